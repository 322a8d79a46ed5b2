//! Slug construction for resolved entries.

/// Build a lowercase, hyphen-joined identifier from a place name and its
/// region, e.g. `("Newport - Casnewydd", "Newport")` gives
/// `"newport-casnewydd-newport"`.
///
/// Missing parts simply shorten the slug.
pub fn build_slug(name: &str, region: &str) -> String {
    let route = format!("{}, {}", name, region);

    route
        .replace(" - ", " ")
        .replace(',', "")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_region() {
        assert_eq!(build_slug("Oxford", "Oxfordshire"), "oxford-oxfordshire");
        assert_eq!(build_slug("Greater London", "Camden"), "greater-london-camden");
    }

    #[test]
    fn test_spaced_hyphen_collapses() {
        assert_eq!(build_slug("London - Central", "UK"), "london-central-uk");
    }

    #[test]
    fn test_inner_hyphens_and_punctuation_kept() {
        assert_eq!(
            build_slug("Stoke-on-Trent", "Stoke-on-Trent"),
            "stoke-on-trent-stoke-on-trent"
        );
        assert_eq!(build_slug("King's Lynn", "Norfolk"), "king's-lynn-norfolk");
    }

    #[test]
    fn test_commas_removed() {
        assert_eq!(
            build_slug("Bath, Somerset", "Bath and North East Somerset"),
            "bath-somerset-bath-and-north-east-somerset"
        );
    }

    #[test]
    fn test_missing_parts_shorten() {
        assert_eq!(build_slug("Oxford", ""), "oxford");
        assert_eq!(build_slug("", "Oxfordshire"), "oxfordshire");
        assert_eq!(build_slug("", ""), "");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            build_slug("Brighton and Hove", "East Sussex"),
            build_slug("Brighton and Hove", "East Sussex")
        );
    }
}
