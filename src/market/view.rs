//! The three marketplace screens.

mod home;
mod professionals;
mod profile;

pub use home::HomeView;
pub use professionals::ProfessionalListView;
pub use profile::ProfileView;

/// Render a 5-star rating bar: the floor of the rating filled, the rest empty.
pub fn stars(rating: f64) -> String {
    let filled = (rating.floor().clamp(0.0, 5.0)) as usize;
    let mut bar = "★".repeat(filled);
    bar.push_str(&"☆".repeat(5 - filled));
    bar
}

/// Availability badge text.
pub const fn availability_label(available: bool) -> &'static str {
    if available { "Disponible" } else { "Ocupado" }
}

/// Terminal glyph for a category icon name from the API.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "zap" => "⚡",
        "droplets" => "💧",
        "hammer" => "🔨",
        "paintbrush" => "🖌",
        "scissors" => "✂",
        _ => "🔧",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_floors_the_rating() {
        assert_eq!(stars(3.7), "★★★☆☆");
        assert_eq!(stars(4.0), "★★★★☆");
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(stars(0.9), "☆☆☆☆☆");
    }

    #[test]
    fn test_stars_clamps_out_of_range() {
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
        assert_eq!(stars(7.2), "★★★★★");
    }

    #[test]
    fn test_unknown_icon_falls_back_to_wrench() {
        assert_eq!(icon_glyph("zap"), "⚡");
        assert_eq!(icon_glyph("unknown"), "🔧");
    }
}
