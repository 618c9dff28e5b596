//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::error::invalid_parameter;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests load failures name the file and chain the decoder error
    // Verified by breaking the source chain
    #[test]
    fn test_image_load_error() {
        let error = MosaicError::ImageLoad {
            path: PathBuf::from("tiles/broken.png"),
            source: image::ImageError::IoError(std::io::Error::other("truncated stream")),
        };

        let message = error.to_string();
        assert!(message.contains("tiles/broken.png"));
        assert!(message.contains("truncated stream"));
        assert!(error.source().is_some());
    }

    // Tests orientation rejection explains what is and is not handled
    // Verified by omitting the orientation from the message
    #[test]
    fn test_unsupported_orientation_error() {
        let error = MosaicError::UnsupportedOrientation {
            path: PathBuf::from("tiles/mirrored.jpg"),
            orientation: "FlipHorizontal".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("FlipHorizontal"));
        assert!(message.contains("tiles/mirrored.jpg"));
        assert!(message.contains("only pure rotations"));
        assert!(error.source().is_none());
    }

    // Tests parameter errors contain all three fields
    // Verified by omitting the value from the message
    #[test]
    fn test_invalid_parameter_error() {
        let error = MosaicError::InvalidParameter {
            parameter: "usages_per_image",
            value: "0".to_string(),
            reason: "must be at least one".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("usages_per_image"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be at least one"));
        assert!(error.source().is_none());
    }

    // Tests the helper stringifies values of any displayable type
    // Verified by dropping the value conversion
    #[test]
    fn test_invalid_parameter_helper() {
        let error = invalid_parameter("horizontal_sub_sections", &0_u32, &"must be at least one");

        assert_eq!(
            error.to_string(),
            "Invalid parameter 'horizontal_sub_sections' = '0': must be at least one"
        );
    }

    // Tests the empty assignment message reports the scored count
    // Verified by omitting the count from the message
    #[test]
    fn test_empty_assignment_error() {
        let error = MosaicError::EmptyAssignment {
            scored_candidates: 17,
        };

        let message = error.to_string();
        assert!(message.contains("17"));
        assert!(message.contains("No candidate claimed any cell"));
        assert!(error.source().is_none());
    }

    // Tests export failures name the destination and chain the encoder error
    #[test]
    fn test_image_export_error() {
        let error = MosaicError::ImageExport {
            path: PathBuf::from("/restricted/collage-1.jpg"),
            source: image::ImageError::IoError(std::io::Error::other("access denied")),
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/collage-1.jpg"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests file system errors name the failed operation
    // Verified by omitting the operation from the message
    #[test]
    fn test_file_system_error() {
        let error = MosaicError::FileSystem {
            path: PathBuf::from("/tmp/mosaic-out"),
            operation: "create output directory",
            source: std::io::Error::other("read-only file system"),
        };

        let message = error.to_string();
        assert!(message.contains("create output directory"));
        assert!(message.contains("/tmp/mosaic-out"));
        assert!(message.contains("read-only file system"));
        assert!(error.source().is_some());
    }
}
