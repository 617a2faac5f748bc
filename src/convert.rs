use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::error::ConvertError;
use crate::raster::Rasterizer;

/// Fixed render resolution; output must stay pixel-compatible across runs.
pub const RENDER_DPI: u16 = 300;

pub const JPEG_QUALITY: u8 = 75;

/// `page_<index>.jpg`, with `index` starting at 1.
pub fn page_file_name(index: usize) -> String {
    format!("page_{index}.jpg")
}

pub fn page_output_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(page_file_name(index))
}

/// Render `pdf_path` and write one JPEG per page into `output_dir`.
///
/// Each file's path is written to `out` as its own line, and flushed, as soon
/// as the file is on disk. Pages written before a failure are left in place.
pub fn convert_pdf<R, W>(
    rasterizer: &R,
    pdf_path: &Path,
    output_dir: &Path,
    out: &mut W,
) -> Result<Vec<PathBuf>, ConvertError>
where
    R: Rasterizer + ?Sized,
    W: Write,
{
    let mut written = Vec::new();

    let mut on_page = |page: DynamicImage| -> Result<(), ConvertError> {
        let index = written.len() + 1;
        let path = page_output_path(output_dir, index);
        save_jpeg(&page, index, &path)?;

        writeln!(out, "{}", path.display()).map_err(ConvertError::Output)?;
        out.flush().map_err(ConvertError::Output)?;

        written.push(path);
        Ok(())
    };
    rasterizer.rasterize(pdf_path, RENDER_DPI, &mut on_page)?;

    log::info!(
        "converted {} pages of {} into {}",
        written.len(),
        pdf_path.display(),
        output_dir.display()
    );
    Ok(written)
}

fn save_jpeg(page: &DynamicImage, index: usize, path: &Path) -> Result<(), ConvertError> {
    let write_err = |source: std::io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    // JPEG carries no alpha channel.
    let rgb = DynamicImage::ImageRgb8(page.to_rgb8());
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(|source| match source {
        image::ImageError::IoError(e) => write_err(e),
        source => ConvertError::Encode { page: index, source },
    })?;

    writer.flush().map_err(write_err)
}
