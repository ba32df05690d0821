use alloy_primitives::Address;

use crate::display::short_address;

/// The connected account, if any. Set by `connect`, never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    address: Option<Address>,
}

impl WalletSession {
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Store the active account. Returns true when the address changed.
    pub fn set_address(&mut self, address: Address) -> bool {
        let changed = self.address != Some(address);
        self.address = Some(address);
        changed
    }

    pub fn short_address(&self) -> Option<String> {
        self.address.as_ref().map(short_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let session = WalletSession::default();
        assert!(!session.is_connected());
        assert!(session.short_address().is_none());
    }

    #[test]
    fn set_address_reports_change() {
        let mut session = WalletSession::default();
        let addr = Address::repeat_byte(0x11);
        assert!(session.set_address(addr));
        assert!(!session.set_address(addr));
        assert!(session.set_address(Address::repeat_byte(0x22)));
        assert_eq!(session.address(), Some(Address::repeat_byte(0x22)));
    }
}
