// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;

    #[test]
    fn test_time_spec_from_components() {
        let time = TimeSpec::from_components(1, 2, 3, 500);
        assert_eq!(time.seconds, 3723.5);
    }

    #[test]
    fn test_time_spec_parse_seconds() {
        let time = TimeSpec::parse("123.456").unwrap();
        assert_eq!(time.seconds, 123.456);
    }

    #[test]
    fn test_time_spec_parse_mm_ss() {
        let time = TimeSpec::parse("01:30.5").unwrap();
        assert_eq!(time.seconds, 90.5);
    }

    #[test]
    fn test_time_spec_parse_hh_mm_ss() {
        let time = TimeSpec::parse("01:02:03.5").unwrap();
        assert_eq!(time.seconds, 3723.5);
    }

    #[test]
    fn test_time_spec_parse_invalid() {
        assert!(TimeSpec::parse("invalid").is_err());
        assert!(TimeSpec::parse("00:60").is_err());
        assert!(TimeSpec::parse("01:75:00").is_err());
        assert!(TimeSpec::parse("-10").is_err());
        assert!(TimeSpec::parse("1:2:3:4").is_err());
    }

    #[test]
    fn test_time_spec_timestamp() {
        assert_eq!(TimeSpec::from_seconds(0.0).to_timestamp(), "00:00:00.000");
        assert_eq!(TimeSpec::from_seconds(10.0).to_timestamp(), "00:00:10.000");
        assert_eq!(
            TimeSpec::from_components(1, 2, 3, 456).to_timestamp(),
            "01:02:03.456"
        );
    }

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_extension(".mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("MKV"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("mp3"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_extension(".txt"), None);
    }

    #[test]
    fn test_category_parse_known_tokens() {
        assert_eq!(
            Category::parse("-filter_complex").unwrap(),
            Category::COMPOSABLE_FILTER
        );
        assert_eq!(Category::parse(" -ss ").unwrap(), Category::SEEK);
        assert!(Category::parse("-ss").unwrap().is_seek());
    }

    #[test]
    fn test_category_parse_rejects_typos() {
        let err = Category::parse("-filter_compelx").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRules(_)));
    }

    #[test]
    fn test_trim_request_args() {
        let request =
            EditRequest::trim(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(10.0)).unwrap();
        assert_eq!(
            request.to_args(),
            vec!["-ss", "00:00:00.000", "-to", "00:00:10.000"]
        );
        assert_eq!(request.expression(), None);
    }

    #[test]
    fn test_trim_request_rejects_reversed_range() {
        let err = EditRequest::trim(TimeSpec::from_seconds(5.0), TimeSpec::from_seconds(1.0))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimeRange(_)));
    }

    #[test]
    fn test_expr_request_args() {
        let request = EditRequest::expr(Category::ASPECT, "aspect", "1.777778");
        assert_eq!(request.to_args(), vec!["-aspect", "1.777778"]);
        assert_eq!(request.key.as_str(), "aspect");
    }

    #[test]
    fn test_aspect_ratio_parse() {
        assert_eq!(AspectRatio::parse("16:9").unwrap().to_arg(), "1.777778");
        assert_eq!(AspectRatio::parse("shorts").unwrap(), AspectRatio::SHORTS);
        assert_eq!(AspectRatio::parse("1").unwrap(), AspectRatio::SQUARE);
        assert!(AspectRatio::parse("4:0").is_err());
        assert!(AspectRatio::parse("-2").is_err());
    }

    #[test]
    fn test_invocation_command_line_quotes_graphs() {
        let invocation = Invocation::new("ffmpeg")
            .args(["-i", "in.mp4", "-filter_complex"])
            .arg("[0]scale=1:1[a];[a]crop=1:1[b]");
        assert_eq!(
            invocation.command_line(),
            "ffmpeg -i in.mp4 -filter_complex '[0]scale=1:1[a];[a]crop=1:1[b]'"
        );
    }
}
