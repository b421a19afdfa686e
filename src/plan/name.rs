//! Android resource name normalization.

/// Turn a target name into a valid Android resource name.
///
/// Lower-cases, then replaces every `-` with `_` and every `#` with `pound`.
/// Only the first `*` (-> `star`) and first `&` (-> `_and_`) are replaced.
pub fn normalize_android_name(name: &str) -> String {
    name.to_lowercase()
        .replace('-', "_")
        .replace('#', "pound")
        .replacen('*', "star", 1)
        .replacen('&', "_and_", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_dash() {
        assert_eq!(normalize_android_name("Big-Red-Button"), "big_red_button");
    }

    #[test]
    fn test_pound_is_exhaustive() {
        assert_eq!(normalize_android_name("#1#2"), "pound1pound2");
    }

    #[test]
    fn test_star_and_ampersand_first_only() {
        assert_eq!(normalize_android_name("a*b*c"), "astarb*c");
        assert_eq!(normalize_android_name("r&d&x"), "r_and_d&x");
    }

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(normalize_android_name("icon_home"), "icon_home");
    }
}
