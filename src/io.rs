//! File I/O: PNG export and data-URI text files.

use image::codecs::png::PngEncoder;
use image::{ImageError, RgbaImage};
use rfd::FileDialog;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write an image as a PNG file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = PngEncoder::new(&mut writer);
    #[allow(deprecated)]
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(())
}

/// Read a data-URI (or bare base64) payload from a text file, trimming
/// surrounding whitespace so trailing newlines don't poison the decode.
pub fn read_data_uri(path: &Path) -> Result<String, std::io::Error> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Write a data URI to a text file with a trailing newline.
pub fn write_data_uri(path: &Path, uri: &str) -> Result<(), std::io::Error> {
    std::fs::write(path, format!("{}\n", uri))
}

/// Show the native save dialog for a PNG export.
pub fn prompt_save_png_path(suggested_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PNG Image", &["png"])
        .set_file_name(suggested_name)
        .save_file()
}

/// Append `.png` when the chosen path has no extension.
pub fn with_png_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension("png")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("signpad_test_{}_{}", std::process::id(), name))
    }

    /// A saved PNG loads back with the same pixels.
    #[test]
    fn saved_png_reads_back_identically() {
        let mut image = RgbaImage::new(10, 6);
        image.put_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let path = temp_path("roundtrip.png");

        save_png(&image, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.dimensions(), (10, 6));
        assert_eq!(loaded.as_raw(), image.as_raw());
    }

    /// Data-URI files survive a write/read cycle and lose stray whitespace.
    #[test]
    fn data_uri_file_is_trimmed_on_read() {
        let path = temp_path("uri.txt");
        write_data_uri(&path, "data:image/png;base64,AAAA").unwrap();
        let uri = read_data_uri(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(uri, "data:image/png;base64,AAAA");
    }

    #[test]
    fn png_extension_added_only_when_missing() {
        assert_eq!(
            with_png_extension(PathBuf::from("out/sig")),
            PathBuf::from("out/sig.png")
        );
        assert_eq!(
            with_png_extension(PathBuf::from("out/sig.PNG")),
            PathBuf::from("out/sig.PNG")
        );
    }
}
