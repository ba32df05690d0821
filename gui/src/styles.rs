use iced::font::Weight;
use iced::widget::{button, container, Space};
use iced::{Background, Border, Color, Element, Fill, Font, Shadow, Theme, Vector};

use crate::{ACTIVE, BG, BORDER, MUTED, PRIMARY, SURFACE};

pub const ACCENT: Color = Color::from_rgb(0.059, 0.757, 0.718);
pub const DANGER: Color = Color::from_rgb(0.906, 0.192, 0.192);
pub const WARNING: Color = Color::from_rgb(1.0, 0.757, 0.027);

const LABEL: Color = Color::from_rgb(0.85, 0.87, 0.90);
const DIM_BORDER: Color = Color::from_rgba(0.204, 0.259, 0.337, 0.5);

pub const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

fn rounded(radius: f32) -> Border {
    Border {
        radius: radius.into(),
        ..Default::default()
    }
}

fn outlined(color: Color, radius: f32) -> Border {
    Border {
        color,
        width: 1.0,
        radius: radius.into(),
    }
}

fn fill(background: Option<Color>, text_color: Color, border: Border) -> button::Style {
    button::Style {
        background: background.map(Background::Color),
        text_color,
        border,
        ..Default::default()
    }
}

fn glow(alpha: f32, y: f32, blur_radius: f32) -> Shadow {
    Shadow {
        color: Color { a: alpha, ..PRIMARY },
        offset: Vector::new(0.0, y),
        blur_radius,
    }
}

/// Greyed-out look shared by every button while its action is unavailable
/// (nothing connected, a transaction in flight, empty amount).
fn disabled() -> button::Style {
    fill(
        Some(Color::from_rgb(0.15, 0.19, 0.25)),
        Color::from_rgba(1.0, 1.0, 1.0, 0.35),
        rounded(8.0),
    )
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(SURFACE)),
        border: outlined(BORDER, 12.0),
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

pub fn toast(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ACTIVE)),
        border: outlined(BORDER, 10.0),
        ..Default::default()
    }
}

/// Gold stake button.
pub fn btn_primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => button::Style {
            shadow: glow(0.25, 2.0, 6.0),
            ..fill(Some(PRIMARY), BG, rounded(8.0))
        },
        button::Status::Hovered => button::Style {
            shadow: glow(0.4, 3.0, 10.0),
            ..fill(Some(Color::from_rgb(1.0, 0.788, 0.282)), BG, rounded(8.0))
        },
        button::Status::Pressed => fill(Some(Color::from_rgb(0.859, 0.643, 0.125)), BG, rounded(8.0)),
        button::Status::Disabled => disabled(),
    }
}

pub fn btn_secondary(_theme: &Theme, status: button::Status) -> button::Style {
    let border = outlined(BORDER, 8.0);
    match status {
        button::Status::Active => fill(None, LABEL, border),
        button::Status::Hovered => fill(Some(ACTIVE), Color::WHITE, border),
        button::Status::Pressed => fill(Some(SURFACE), Color::WHITE, border),
        button::Status::Disabled => fill(
            None,
            Color::from_rgba(1.0, 1.0, 1.0, 0.3),
            outlined(DIM_BORDER, 8.0),
        ),
    }
}

/// Withdraw button: tinted until hovered.
pub fn btn_danger(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => fill(
            Some(Color { a: 0.12, ..DANGER }),
            DANGER,
            outlined(Color { a: 0.25, ..DANGER }, 8.0),
        ),
        button::Status::Hovered => fill(Some(DANGER), Color::WHITE, rounded(8.0)),
        button::Status::Pressed => fill(Some(Color::from_rgb(0.75, 0.15, 0.15)), Color::WHITE, rounded(8.0)),
        button::Status::Disabled => disabled(),
    }
}

pub fn btn_ghost(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => fill(None, LABEL, rounded(8.0)),
        button::Status::Hovered => fill(
            Some(Color::from_rgba(1.0, 1.0, 1.0, 0.05)),
            Color::WHITE,
            rounded(8.0),
        ),
        _ => fill(None, MUTED, rounded(8.0)),
    }
}

pub fn separator<'a, M: 'a>() -> Element<'a, M> {
    container(Space::new())
        .width(Fill)
        .height(1)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DIM_BORDER)),
            ..Default::default()
        })
        .into()
}
