use crate::messages::Message;
use crate::{styles, App, MUTED};
use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Element, Fill, Length};
use qari_staking_core::{NotificationLevel, Phase, ViewState};

impl App {
    pub(crate) fn view_dashboard(&self) -> Element<'_, Message> {
        let symbol = self.config.token_symbol.as_str();
        let view = ViewState::project(&self.dashboard, symbol, &chrono::Local);

        // -- Header --
        let mut connect_btn = button(text(view.connect_label.clone()).size(14))
            .padding([8, 16])
            .style(styles::btn_secondary);
        if view.phase != Phase::Submitting {
            connect_btn = connect_btn.on_press(Message::Connect);
        }
        let mut header = row![
            text("QARI Staking").size(24).font(styles::BOLD),
            Space::new().width(Fill),
            connect_btn,
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);
        if self.dashboard.session().is_connected() {
            header = header.push(
                button(text("Copy").size(12))
                    .padding([8, 12])
                    .style(styles::btn_ghost)
                    .on_press(Message::CopyAddress),
            );
        }

        let mut col = column![header].spacing(16);

        if let Some(err) = &self.setup_error {
            col = col.push(text(err.as_str()).size(13).color(styles::DANGER));
        }

        // -- Stake form card --
        let mut amount = text_input(&format!("Amount ({symbol})"), &view.amount_input)
            .on_input(Message::AmountChanged);
        if view.stake_enabled {
            amount = amount.on_submit(Message::Stake);
        }

        let mut stake_btn = button(text(view.stake_label).size(14))
            .padding([10, 24])
            .style(styles::btn_primary);
        if view.stake_enabled {
            stake_btn = stake_btn.on_press(Message::Stake);
        }
        let mut withdraw_btn = button(text(view.withdraw_label).size(14))
            .padding([10, 24])
            .style(styles::btn_danger);
        if view.withdraw_enabled {
            withdraw_btn = withdraw_btn.on_press(Message::Withdraw);
        }

        let form_content = column![
            text(format!("Stake {symbol}")).size(16),
            Space::new().height(4),
            text("Amount").size(12).color(MUTED),
            amount,
            Space::new().height(8),
            row![stake_btn, withdraw_btn].spacing(12),
        ]
        .spacing(4);

        col = col.push(
            container(form_content)
                .padding(24)
                .width(Fill)
                .style(styles::card),
        );

        // -- Summary card --
        let mut refresh_btn = button(text("Refresh").size(13))
            .padding([8, 16])
            .style(styles::btn_secondary);
        if view.phase == Phase::Ready {
            refresh_btn = refresh_btn.on_press(Message::Refresh);
        }

        let mut stake_line = row![
            text("Your Stake:").size(14).color(MUTED).width(Length::Fixed(110.0)),
            text(view.your_stake.clone()).size(14).font(styles::BOLD),
        ]
        .spacing(8);
        if view.stale {
            stake_line = stake_line.push(text("(may be outdated)").size(12).color(styles::WARNING));
        }
        let since_line = row![
            text("Staked Since:").size(14).color(MUTED).width(Length::Fixed(110.0)),
            text(view.staked_since.clone()).size(14),
        ]
        .spacing(8);

        let mut summary = column![
            row![
                text("Your Position").size(16),
                Space::new().width(Fill),
                refresh_btn,
            ]
            .align_y(iced::Alignment::Center),
            styles::separator(),
            stake_line,
            since_line,
        ]
        .spacing(12);
        if view.phase == Phase::Loading {
            summary = summary.push(text("Loading...").size(13).color(MUTED));
        }
        if self.dashboard.last_transaction().is_some() {
            summary = summary.push(
                button(text("View last transaction").size(12))
                    .padding([6, 12])
                    .style(styles::btn_ghost)
                    .on_press(Message::OpenExplorer),
            );
        }

        col = col.push(
            container(summary)
                .padding(20)
                .width(Fill)
                .style(styles::card),
        );

        // -- Toasts --
        for (index, n) in self.dashboard.notifications().iter().enumerate() {
            let color = match n.level {
                NotificationLevel::Success => styles::ACCENT,
                NotificationLevel::Error => styles::DANGER,
                NotificationLevel::Info => MUTED,
            };
            col = col.push(
                container(
                    row![
                        text(n.to_string()).size(13).color(color),
                        Space::new().width(Fill),
                        button(text("Dismiss").size(11))
                            .padding([4, 10])
                            .style(styles::btn_ghost)
                            .on_press(Message::DismissToast(index)),
                    ]
                    .align_y(iced::Alignment::Center),
                )
                .padding([8, 14])
                .width(Fill)
                .style(styles::toast),
            );
        }

        if let Some(msg) = &self.status_message {
            col = col.push(text(msg.as_str()).size(13).color(MUTED));
        }

        container(col.max_width(560))
            .center_x(Fill)
            .padding(24)
            .into()
    }
}
