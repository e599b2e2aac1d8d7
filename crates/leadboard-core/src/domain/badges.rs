/// Splits a comma-separated badge input into trimmed labels, dropping empties.
pub fn parse_badges(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_badges(badges: &[String]) -> String {
    badges.join(", ")
}

#[cfg(test)]
mod tests {
    use super::{format_badges, parse_badges};

    #[test]
    fn parse_badges_trims_labels() {
        let badges = parse_badges(" VIP , Enterprise,Priority ");
        assert_eq!(badges, vec!["VIP", "Enterprise", "Priority"]);
    }

    #[test]
    fn parse_badges_drops_empty_segments() {
        let badges = parse_badges("VIP,, ,Partner,");
        assert_eq!(badges, vec!["VIP", "Partner"]);
    }

    #[test]
    fn parse_badges_empty_input() {
        assert!(parse_badges("   ").is_empty());
    }

    #[test]
    fn format_badges_round_trips_form_input() {
        let badges = parse_badges("VIP, Partner");
        assert_eq!(format_badges(&badges), "VIP, Partner");
    }
}
