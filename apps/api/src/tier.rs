use std::fmt;

/// Membership tiers in ascending order of privilege.
/// The discriminant doubles as the rank used by the hierarchical check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Affiliate = 1,
    Vip = 2,
    Master = 3,
    Elite = 4,
}

/// Tier assigned when none is supplied, and the backfill value for legacy rows.
pub const DEFAULT_TIER: Tier = Tier::Affiliate;

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Affiliate, Tier::Vip, Tier::Master, Tier::Elite];

    /// Rank used by the hierarchical check. Real tiers rank 1..=4; the
    /// unknown-tier sentinel is 0, so it never collides with a real rank.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Affiliate => "AFFILIATE",
            Tier::Vip => "VIP",
            Tier::Master => "MASTER",
            Tier::Elite => "ELITE",
        }
    }

    /// Exact match against the stored (normalized, uppercase) names.
    /// Callers pass input through [`normalize`] first.
    pub fn parse(s: &str) -> Option<Tier> {
        match s {
            "AFFILIATE" => Some(Tier::Affiliate),
            "VIP" => Some(Tier::Vip),
            "MASTER" => Some(Tier::Master),
            "ELITE" => Some(Tier::Elite),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical form of a free-form tier string: trimmed and uppercased.
/// Empty input stays empty; the caller decides the fallback.
pub fn normalize(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

/// Rank of a normalized tier string. Unrecognized values rank 0, below
/// every real tier, so accounts carrying a bad tier fail every check
/// rather than erroring.
pub fn rank_of(tier: &str) -> u8 {
    Tier::parse(tier).map(Tier::rank).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_strictly_increase_with_privilege() {
        assert_eq!(Tier::Affiliate.rank(), 1);
        assert_eq!(Tier::Vip.rank(), 2);
        assert_eq!(Tier::Master.rank(), 3);
        assert_eq!(Tier::Elite.rank(), 4);
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(normalize(" vip "), "VIP");
        assert_eq!(normalize("Vip"), "VIP");
        assert_eq!(normalize("VIP"), "VIP");
        assert_eq!(normalize("  elite\t"), "ELITE");
    }

    #[test]
    fn test_normalize_empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert_eq!(Tier::parse("GOLD"), None);
        assert_eq!(Tier::parse(""), None);
        // parse expects normalized input; lowercase is not a member
        assert_eq!(Tier::parse("vip"), None);
    }

    #[test]
    fn test_rank_of_unknown_is_floor_sentinel() {
        assert_eq!(rank_of("GOLD"), 0);
        assert_eq!(rank_of(""), 0);
        assert!(Tier::ALL.iter().all(|t| t.rank() > rank_of("GOLD")));
    }

    #[test]
    fn test_allowed_iff_rank_meets_required() {
        for user in Tier::ALL {
            for required in Tier::ALL {
                let allowed = rank_of(user.as_str()) >= required.rank();
                assert_eq!(allowed, user.rank() >= required.rank());
            }
        }
    }

    #[test]
    fn test_display_matches_stored_form() {
        assert_eq!(Tier::Master.to_string(), "MASTER");
    }
}
