//! Tests for `Recipient`.

use super::{Recipient, RecipientKind};

mod recipient {
    use super::*;

    #[test]
    fn identifier_returns_wrapped_value() {
        assert_eq!(Recipient::device("token-1").identifier(), "token-1");
        assert_eq!(Recipient::topic("news").identifier(), "news");
        assert_eq!(Recipient::group("APA91bGHX").identifier(), "APA91bGHX");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Recipient::device("t").kind(), RecipientKind::Device);
        assert_eq!(Recipient::topic("t").kind(), RecipientKind::Topic);
        assert_eq!(Recipient::group("t").kind(), RecipientKind::Group);
    }

    #[test]
    fn constructors_match_tuple_variants() {
        assert_eq!(
            Recipient::group("key"),
            Recipient::Group("key".to_string())
        );
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(RecipientKind::Device.to_string(), "device");
        assert_eq!(RecipientKind::Topic.to_string(), "topic");
        assert_eq!(RecipientKind::Group.to_string(), "group");
    }
}
