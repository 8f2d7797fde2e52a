// Unit tests for media assets and edit builders

#[cfg(test)]
mod tests {
    use std::path::Path;

    use async_trait::async_trait;

    use crate::domain::errors::*;
    use crate::domain::model::*;
    use crate::media::*;
    use crate::ports::ProbePort;

    struct FixedProbe;

    #[async_trait]
    impl ProbePort for FixedProbe {
        async fn probe_media(&self, _file_path: &Path) -> Result<MediaInfo, DomainError> {
            Ok(MediaInfo {
                width: Some(1280),
                height: Some(720),
                has_video: true,
                has_audio: true,
                ..MediaInfo::default()
            })
        }
    }

    fn video() -> MediaAsset {
        MediaAsset::unprobed("clip.mp4").unwrap()
    }

    fn audio() -> MediaAsset {
        MediaAsset::unprobed("song.mp3").unwrap()
    }

    fn queued(asset: &MediaAsset, category: Category) -> Vec<String> {
        asset
            .edits()
            .peek_category(category)
            .into_iter()
            .filter_map(|request| request.expression().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(video().kind(), MediaKind::Video);
        assert_eq!(audio().kind(), MediaKind::Audio);
        assert_eq!(MediaAsset::unprobed("CLIP.MOV").unwrap().extension(), "mov");
        assert!(matches!(
            MediaAsset::unprobed("notes.txt"),
            Err(DomainError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_builders_chain_in_order() {
        let mut asset = video();
        asset
            .resize(1920, 1080)
            .unwrap()
            .crop(640, 360, 10, 20)
            .unwrap()
            .blur(5)
            .unwrap();

        assert_eq!(
            queued(&asset, Category::COMPOSABLE_FILTER),
            vec!["scale=1920:1080", "crop=640:360:10:20", "boxblur=5"]
        );
    }

    #[test]
    fn test_resize_keeping_ratio() {
        let mut asset = video();
        asset.resize_by_width(1280).unwrap();
        asset.resize_by_height(720).unwrap();
        assert_eq!(
            queued(&asset, Category::COMPOSABLE_FILTER),
            vec!["scale=1280:-1", "scale=-1:720"]
        );
    }

    #[test]
    fn test_crop_out_edges() {
        let mut asset = video();
        asset.crop_out_top(40).unwrap();
        asset.crop_out_left(8).unwrap();
        assert_eq!(
            queued(&asset, Category::COMPOSABLE_FILTER),
            vec!["crop=in_w:in_h-40:0:40", "crop=in_w-8:in_h:8:0"]
        );
    }

    #[test]
    fn test_range_validation() {
        let mut asset = video();
        assert!(asset.blur(51).is_err());
        assert!(asset.change_volume(101.0).is_err());
        assert!(asset.change_volume(-1.0).is_err());
        assert!(asset.resize(0, 720).is_err());
        assert!(!asset.has_pending_edits());
    }

    #[test]
    fn test_trim_rejects_reversed_range() {
        let mut asset = video();
        let result = asset.trim(TimeSpec::from_seconds(10.0), TimeSpec::from_seconds(5.0));
        assert!(matches!(result, Err(DomainError::InvalidTimeRange(_))));
    }

    #[test]
    fn test_kind_specific_edits() {
        let mut clip = video();
        assert!(matches!(
            clip.nightcore(),
            Err(DomainError::UnsupportedEdit(_))
        ));
        assert!(clip.bass_boost().is_err());

        let mut song = audio();
        assert!(song.blur(3).is_err());
        assert!(song.set_aspect_ratio(AspectRatio::SQUARE).is_err());
        song.nightcore().unwrap().bass_boost().unwrap().speed_up(1.5).unwrap();

        assert_eq!(queued(&song, Category::EQUALIZER).len(), 1);
        assert_eq!(queued(&song, Category::AUDIO_FILTER), vec!["atempo=1.5"]);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut asset = video();
        asset.change_volume(0.5).unwrap().mute().unwrap();
        assert_eq!(
            queued(&asset, Category::AUDIO_FILTER),
            vec!["volume=0.5", "volume=0"]
        );
    }

    #[test]
    fn test_directive_parsing() {
        assert_eq!(
            "scale=1280:720".parse::<EditDirective>().unwrap(),
            EditDirective::Resize {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(
            "crop=100:50".parse::<EditDirective>().unwrap(),
            EditDirective::Crop {
                width: 100,
                height: 50,
                x: 0,
                y: 0
            }
        );
        assert_eq!(
            "trim=5,1:30".parse::<EditDirective>().unwrap(),
            EditDirective::Trim {
                start: TimeSpec::from_seconds(5.0),
                end: TimeSpec::from_seconds(90.0)
            }
        );
        assert_eq!(
            "Bass-Boost".parse::<EditDirective>().unwrap(),
            EditDirective::BassBoost
        );
        assert_eq!(
            "aspect=shorts".parse::<EditDirective>().unwrap(),
            EditDirective::Aspect(AspectRatio::SHORTS)
        );
    }

    #[test]
    fn test_directive_errors() {
        assert!("scale=1280".parse::<EditDirective>().is_err());
        assert!("crop=1:2:3".parse::<EditDirective>().is_err());
        assert!("sharpen=2".parse::<EditDirective>().is_err());
        assert!("mute=1".parse::<EditDirective>().is_err());
        assert!("blur=lots".parse::<EditDirective>().is_err());
    }

    #[test]
    fn test_directive_apply() {
        let mut asset = video();
        for text in ["trim=0,10", "scale=1920:1080", "aspect=16:9"] {
            text.parse::<EditDirective>().unwrap().apply(&mut asset).unwrap();
        }
        assert_eq!(asset.edits().len(), 3);
        assert_eq!(asset.edits().queue_len(Category::SEEK), 1);
    }

    #[test]
    fn test_directive_display_round_trips() {
        for text in ["scale=640:360", "crop-right=12", "speed=1.25", "mute"] {
            let directive: EditDirective = text.parse().unwrap();
            assert_eq!(directive.to_string(), text);
        }
    }

    #[tokio::test]
    async fn test_load_probes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.mp4");
        std::fs::write(&path, b"not really video").unwrap();

        let asset = MediaAsset::load(&path, &FixedProbe).await.unwrap();
        assert_eq!(asset.info().width, Some(1280));
        assert_eq!(asset.file_name(), "input.mp4");
        assert_eq!(asset.file_path(), path.as_path());
    }

    #[tokio::test]
    async fn test_load_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            MediaAsset::load(dir.path().join("gone.mp4"), &FixedProbe).await,
            Err(DomainError::FileNotFound(_))
        ));
        assert!(matches!(
            MediaAsset::load(dir.path(), &FixedProbe).await,
            Err(DomainError::BadArgs(_))
        ));
    }
}
