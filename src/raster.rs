//! Page rasterization.
//!
//! [`Rasterizer`] is the seam between the conversion loop and whatever turns a
//! PDF into pixels. The production implementation drives PDFium through
//! `pdfium-render`; tests substitute an in-memory fake.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;

use crate::error::ConvertError;

/// PDF user space units per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Environment variable naming a directory that holds the PDFium library.
pub const PDFIUM_DIR_ENV: &str = "PDFIUM_LIB_DIR";

pub type PageSink<'a> = dyn FnMut(DynamicImage) -> Result<(), ConvertError> + 'a;

pub trait Rasterizer {
    /// Render every page of `pdf_path` at `dpi`, handing each image to
    /// `on_page` in ascending page order before the next page is rendered.
    ///
    /// An error returned by `on_page` stops rendering and is passed through.
    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u16,
        on_page: &mut PageSink<'_>,
    ) -> Result<(), ConvertError>;
}

pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind to the first PDFium library found, falling back to the system one.
    pub fn bind() -> Result<Self, ConvertError> {
        let env_dir = std::env::var_os(PDFIUM_DIR_ENV).map(PathBuf::from);
        let exe = std::env::current_exe().ok();

        for dir in library_search_paths(env_dir, exe) {
            let lib_path = Pdfium::pdfium_platform_library_name_at_path(&dir);
            if !lib_path.exists() {
                continue;
            }
            log::debug!("trying pdfium at {}", lib_path.display());
            match Pdfium::bind_to_library(&lib_path) {
                Ok(bindings) => {
                    log::debug!("bound pdfium from {}", lib_path.display());
                    return Ok(Self {
                        pdfium: Pdfium::new(bindings),
                    });
                }
                Err(e) => {
                    log::warn!("could not load {}: {}", lib_path.display(), pdfium_reason(&e))
                }
            }
        }

        log::debug!("falling back to system pdfium");
        Pdfium::bind_to_system_library()
            .map(|bindings| Self {
                pdfium: Pdfium::new(bindings),
            })
            .map_err(|e| ConvertError::Library(pdfium_reason(&e)))
    }
}

/// Directories probed for the PDFium library, most specific first.
fn library_search_paths(env_dir: Option<PathBuf>, exe: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = env_dir.into_iter().collect();

    if let Some(exe_dir) = exe.as_deref().and_then(Path::parent) {
        paths.push(exe_dir.join("libs"));
        paths.push(exe_dir.to_path_buf());
    }

    paths.push(PathBuf::from("./"));
    paths
}

/// One-line description of a PDFium failure.
///
/// `PdfiumError`'s `Display` is a pretty-printed debug dump, so the loader
/// error is unwrapped and everything else uses the compact debug form.
fn pdfium_reason(err: &PdfiumError) -> String {
    match err {
        PdfiumError::LoadLibraryError(inner) => inner.to_string(),
        other => format!("{other:?}"),
    }
}

/// Pixel length of `points` rendered at `dpi`, rounded to the nearest pixel.
pub fn pixels_for_points(points: f32, dpi: u16) -> i32 {
    (f64::from(points) * f64::from(dpi) / POINTS_PER_INCH).round() as i32
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u16,
        on_page: &mut PageSink<'_>,
    ) -> Result<(), ConvertError> {
        let document = self
            .pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| ConvertError::Open {
                path: pdf_path.to_path_buf(),
                reason: pdfium_reason(&e),
            })?;

        let pages = document.pages();
        log::debug!("{} has {} pages", pdf_path.display(), pages.len());

        for (index, page) in pages.iter().enumerate() {
            let number = index + 1;
            let width = pixels_for_points(page.width().value, dpi);
            let height = pixels_for_points(page.height().value, dpi);

            let render_config = PdfRenderConfig::new()
                .set_target_size(width, height)
                .render_form_data(true)
                .render_annotations(true);

            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| ConvertError::Render {
                    page: number,
                    reason: pdfium_reason(&e),
                })?;
            let image = bitmap.as_image();
            log::debug!("rendered page {} at {}x{}", number, image.width(), image.height());
            on_page(image)?;
        }

        Ok(())
    }
}
