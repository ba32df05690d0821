use iced::Task;
use qari_staking_core::QueryTicket;

use crate::messages::{Message, TaskError};
use crate::App;

impl App {
    // -- Update --

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AmountChanged(v) => {
                self.dashboard.set_amount_input(v);
                Task::none()
            }

            // -- Wallet session --
            Message::Connect => {
                self.status_message = None;
                if self.dashboard.begin_connect(self.service.has_provider()).is_err() {
                    return Task::none();
                }
                let service = self.service.clone();
                Task::perform(
                    async move { service.request_account().await },
                    |r| Message::Connected(r.map_err(TaskError::from)),
                )
            }
            Message::Connected(result) => {
                match self.dashboard.apply_connect(result.map_err(Into::into)) {
                    Ok(ticket) => self.load_stake(ticket),
                    Err(_) => Task::none(),
                }
            }

            // -- Stake query --
            Message::Refresh => match self.dashboard.begin_query() {
                Some(ticket) => self.load_stake(ticket),
                None => Task::none(),
            },
            Message::StakeLoaded(ticket, result) => {
                // Failures already produced a toast
                let _ = self.dashboard.apply_stake(ticket, result.map_err(Into::into));
                Task::none()
            }

            // -- Mutations --
            Message::Stake => {
                let Ok(ticket) = self.dashboard.begin_stake() else {
                    return Task::none();
                };
                let service = self.service.clone();
                Task::perform(
                    async move { service.stake(ticket.from, ticket.value).await },
                    move |r| Message::MutationDone(ticket, r.map_err(TaskError::from)),
                )
            }
            Message::Withdraw => {
                let Ok(ticket) = self.dashboard.begin_withdraw() else {
                    return Task::none();
                };
                let service = self.service.clone();
                Task::perform(
                    async move { service.withdraw(ticket.from).await },
                    move |r| Message::MutationDone(ticket, r.map_err(TaskError::from)),
                )
            }
            Message::MutationDone(ticket, result) => {
                match self.dashboard.apply_mutation(ticket, result.map_err(Into::into)) {
                    Ok(query) => self.load_stake(query),
                    Err(_) => Task::none(),
                }
            }

            // -- Misc --
            Message::CopyAddress => {
                if let Some(address) = self.dashboard.session().address() {
                    if let Some(cb) = &mut self.clipboard {
                        match cb.set_text(address.to_checksum(None)) {
                            Ok(_) => self.status_message = Some("Address copied".into()),
                            Err(e) => self.status_message = Some(format!("Copy failed: {e}")),
                        }
                    } else {
                        self.status_message = Some("Clipboard not available".into());
                    }
                }
                Task::none()
            }
            Message::OpenExplorer => {
                if let Some(hash) = self.dashboard.last_transaction() {
                    let url = self.config.explorer_tx_url(&hash.to_string());
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(error = %e, %url, "failed to open explorer");
                        self.status_message = Some(format!("Could not open {url}"));
                    }
                }
                Task::none()
            }
            Message::DismissToast(index) => {
                self.dashboard.dismiss_notification(index);
                Task::none()
            }
        }
    }

    fn load_stake(&self, ticket: QueryTicket) -> Task<Message> {
        let service = self.service.clone();
        Task::perform(
            async move { service.fetch_stake(ticket.account).await },
            move |r| Message::StakeLoaded(ticket, r.map_err(TaskError::from)),
        )
    }
}
