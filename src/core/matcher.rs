use crate::domain::model::PreferenceProfile;

/// A user and a product match when they share any one of primary flavor,
/// sweetness or bitterness. Fields missing on either side are skipped.
pub fn matches(user: Option<&PreferenceProfile>, product: Option<&PreferenceProfile>) -> bool {
    let empty = PreferenceProfile::default();
    let user = user.unwrap_or(&empty);
    let product = product.unwrap_or(&empty);

    shared(&user.primary_flavor, &product.primary_flavor)
        || shared(&user.sweetness, &product.sweetness)
        || shared(&user.bitterness, &product.bitterness)
}

fn shared(user: &Option<String>, product: &Option<String>) -> bool {
    matches!((user, product), (Some(u), Some(p)) if u == p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(primary: Option<&str>, sweetness: Option<&str>, bitterness: Option<&str>) -> PreferenceProfile {
        PreferenceProfile {
            primary_flavor: primary.map(str::to_string),
            sweetness: sweetness.map(str::to_string),
            bitterness: bitterness.map(str::to_string),
            ..PreferenceProfile::default()
        }
    }

    #[test]
    fn test_same_primary_flavor_matches() {
        let hoppy = profile(Some("hoppy"), None, None);
        assert!(matches(Some(&hoppy), Some(&hoppy.clone())));
    }

    #[test]
    fn test_different_primary_flavor_does_not_match() {
        let hoppy = profile(Some("hoppy"), None, None);
        let malty = profile(Some("malty"), None, None);
        assert!(!matches(Some(&hoppy), Some(&malty)));
    }

    #[test]
    fn test_empty_profile_never_matches() {
        let hoppy = profile(Some("hoppy"), None, None);
        let empty = PreferenceProfile::default();
        assert!(!matches(Some(&empty), Some(&hoppy)));
        assert!(!matches(Some(&empty), Some(&empty)));
        assert!(!matches(None, Some(&hoppy)));
        assert!(!matches(Some(&hoppy), None));
        assert!(!matches(None, None));
    }

    #[test]
    fn test_single_shared_attribute_is_enough() {
        let user = profile(Some("hoppy"), Some("dry"), Some("high"));
        let product = profile(Some("malty"), Some("sweet"), Some("high"));
        assert!(matches(Some(&user), Some(&product)));

        let product = profile(Some("malty"), Some("dry"), None);
        assert!(matches(Some(&user), Some(&product)));
    }

    #[test]
    fn test_secondary_attributes_are_not_compared() {
        let user = PreferenceProfile {
            aroma: Some(vec!["citrus".to_string()]),
            body: Some("light".to_string()),
            acidity: Some(0.4),
            ..PreferenceProfile::default()
        };
        let product = user.clone();
        assert!(!matches(Some(&user), Some(&product)));
    }

    #[test]
    fn test_match_is_symmetric() {
        let a = profile(None, Some("dry"), Some("low"));
        let b = profile(Some("sour"), None, Some("low"));
        assert_eq!(matches(Some(&a), Some(&b)), matches(Some(&b), Some(&a)));
    }
}
