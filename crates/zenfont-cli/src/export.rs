//! Export session: turns a rendered atlas into TGA and FNT artifacts.
//!
//! Exports run one at a time on a single-threaded runtime. Each sub-export
//! holds a busy flag for its whole duration, and the combined export holds the
//! `processing` flag around both. Flags are released by guards, so every exit
//! path (including errors) leaves them clear.
//!
//! Nothing here touches the filesystem except [`write_artifacts`].

use std::cell::Cell;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zenfont_backend::{
    encode_descriptor, encode_surface, export_tga, hash_bytes, FntError, PngError, Surface,
    TgaError, Variant,
};
use zenfont_spec::{FntPolicy, FontDescriptor};

/// Variants every artifact is written for.
const VARIANTS: [Variant; 2] = [Variant::Base, Variant::Hi];

/// Errors from an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another export holds the flag.
    #[error("{0} export already in progress")]
    Busy(BusyFlag),

    #[error(transparent)]
    Png(#[from] PngError),

    #[error(transparent)]
    Tga(#[from] TgaError),

    #[error(transparent)]
    Fnt(#[from] FntError),

    /// Background compression task did not complete.
    #[error("compression task failed: {0}")]
    Task(String),

    /// Runtime could not be created.
    #[error("failed to create runtime: {0}")]
    Runtime(std::io::Error),

    /// Artifact could not be written.
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One busy-state flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyFlag {
    /// Combined export.
    Processing,
    /// TGA export.
    Image,
    /// FNT export.
    Descriptor,
}

impl std::fmt::Display for BusyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusyFlag::Processing => "combined",
            BusyFlag::Image => "image",
            BusyFlag::Descriptor => "descriptor",
        };
        write!(f, "{}", name)
    }
}

/// Busy-state flags shared by the exports of one session.
#[derive(Debug, Default)]
pub struct BusyFlags {
    processing: Cell<bool>,
    image: Cell<bool>,
    descriptor: Cell<bool>,
}

impl BusyFlags {
    /// Creates a session with all flags clear.
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, flag: BusyFlag) -> &Cell<bool> {
        match flag {
            BusyFlag::Processing => &self.processing,
            BusyFlag::Image => &self.image,
            BusyFlag::Descriptor => &self.descriptor,
        }
    }

    /// Returns true if `flag` is held.
    pub fn is_busy(&self, flag: BusyFlag) -> bool {
        self.cell(flag).get()
    }

    /// Returns true if any flag is held.
    pub fn any_busy(&self) -> bool {
        [BusyFlag::Processing, BusyFlag::Image, BusyFlag::Descriptor]
            .into_iter()
            .any(|flag| self.is_busy(flag))
    }

    /// Sets `flag` until the returned guard is dropped.
    pub fn acquire(&self, flag: BusyFlag) -> Result<BusyGuard<'_>, ExportError> {
        let cell = self.cell(flag);
        if cell.get() {
            return Err(ExportError::Busy(flag));
        }
        cell.set(true);
        Ok(BusyGuard { flags: self, flag })
    }
}

/// Clears its flag on drop.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flags: &'a BusyFlags,
    flag: BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flags.cell(self.flag).set(false);
    }
}

/// A named output buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name (e.g. "My_Font_HI.TGA").
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// BLAKE3 hex digest of the bytes.
    pub fn hash(&self) -> String {
        hash_bytes(&self.bytes)
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Outcome of a combined export.
#[derive(Debug)]
pub struct ExportReport {
    /// TGA artifacts or the image export error.
    pub image: Result<Vec<Artifact>, ExportError>,
    /// FNT artifacts or the descriptor export error. `None` when the image
    /// export failed and the descriptor export was skipped.
    pub descriptor: Option<Result<Vec<Artifact>, ExportError>>,
}

impl ExportReport {
    /// Returns true if both sub-exports produced artifacts.
    pub fn is_ok(&self) -> bool {
        self.image.is_ok() && matches!(self.descriptor, Some(Ok(_)))
    }

    /// Artifacts of the sub-exports that succeeded.
    pub fn artifacts(&self) -> Vec<&Artifact> {
        let image = self.image.as_ref().ok().into_iter().flatten();
        let descriptor = self
            .descriptor
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .into_iter()
            .flatten();
        image.chain(descriptor).collect()
    }

    /// Errors of the sub-exports that failed.
    pub fn errors(&self) -> Vec<&ExportError> {
        let mut errors = Vec::new();
        if let Err(e) = &self.image {
            errors.push(e);
        }
        if let Some(Err(e)) = &self.descriptor {
            errors.push(e);
        }
        errors
    }
}

fn variant_pair(name: &str, extension: &str, bytes: Vec<u8>) -> Vec<Artifact> {
    VARIANTS
        .iter()
        .map(|variant| Artifact {
            file_name: format!("{}{}.{}", name, variant.suffix(), extension),
            bytes: bytes.clone(),
        })
        .collect()
}

/// Builds `<name>.TGA` and `<name>_HI.TGA` from the atlas.
///
/// Both files carry the same bytes. PNG compression runs on the blocking pool
/// and is awaited before the TGA is built.
pub async fn export_image(
    atlas: &Surface,
    name: &str,
    flags: &BusyFlags,
) -> Result<Vec<Artifact>, ExportError> {
    let _guard = flags.acquire(BusyFlag::Image)?;

    let surface = atlas.clone();
    let png = tokio::task::spawn_blocking(move || encode_surface(&surface))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

    let tga = export_tga(&png)?;
    log::debug!("Exported image '{}' ({} bytes)", name, tga.len());
    Ok(variant_pair(name, "TGA", tga))
}

/// Builds `<name>.FNT` and `<name>_HI.FNT` from the descriptor.
pub fn export_descriptor(
    descriptor: &FontDescriptor,
    name: &str,
    policy: FntPolicy,
    flags: &BusyFlags,
) -> Result<Vec<Artifact>, ExportError> {
    let _guard = flags.acquire(BusyFlag::Descriptor)?;
    let fnt = encode_descriptor(descriptor, policy)?;
    log::debug!("Exported descriptor '{}' ({} bytes)", name, fnt.len());
    Ok(variant_pair(name, "FNT", fnt))
}

/// Runs the image export to completion, then the descriptor export.
///
/// Fails only if a combined export is already running. Sub-export failures
/// are reported in the returned [`ExportReport`].
pub async fn export_all(
    atlas: &Surface,
    descriptor: &FontDescriptor,
    name: &str,
    policy: FntPolicy,
    flags: &BusyFlags,
) -> Result<ExportReport, ExportError> {
    let _guard = flags.acquire(BusyFlag::Processing)?;

    let image = export_image(atlas, name, flags).await;
    let descriptor = match &image {
        Ok(_) => Some(export_descriptor(descriptor, name, policy, flags)),
        Err(e) => {
            log::warn!("Image export failed, skipping descriptor: {}", e);
            None
        }
    };

    Ok(ExportReport { image, descriptor })
}

/// Runs [`export_all`] on a fresh current-thread runtime.
pub fn export_blocking(
    atlas: &Surface,
    descriptor: &FontDescriptor,
    name: &str,
    policy: FntPolicy,
) -> Result<ExportReport, ExportError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(ExportError::Runtime)?;
    let flags = BusyFlags::new();
    rt.block_on(export_all(atlas, descriptor, name, policy, &flags))
}

/// Writes artifacts into `out_dir`, creating it if needed.
pub fn write_artifacts(out_dir: &Path, artifacts: &[&Artifact]) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ExportError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    artifacts
        .iter()
        .map(|artifact| {
            let path = out_dir.join(&artifact.file_name);
            std::fs::write(&path, &artifact.bytes).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zenfont_backend::{Color, Rect};

    fn atlas() -> Surface {
        let mut surface = Surface::new(56, 16);
        surface.fill_rect(Rect::new(2.0, 2.0, 4.0, 6.0), Color::black());
        surface
    }

    fn descriptor() -> FontDescriptor {
        FontDescriptor::new("My_Font", 32.0)
    }

    fn names(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.file_name.as_str()).collect()
    }

    #[test]
    fn guard_releases_flag() {
        let flags = BusyFlags::new();
        {
            let _guard = flags.acquire(BusyFlag::Image).unwrap();
            assert!(flags.is_busy(BusyFlag::Image));
            assert!(matches!(
                flags.acquire(BusyFlag::Image),
                Err(ExportError::Busy(BusyFlag::Image))
            ));
            assert!(flags.acquire(BusyFlag::Descriptor).is_ok());
        }
        assert!(!flags.any_busy());
    }

    #[tokio::test]
    async fn export_image_builds_identical_pair() {
        let flags = BusyFlags::new();
        let artifacts = export_image(&atlas(), "My_Font", &flags).await.unwrap();
        assert_eq!(names(&artifacts), vec!["My_Font.TGA", "My_Font_HI.TGA"]);
        assert_eq!(artifacts[0].bytes, artifacts[1].bytes);
        assert_eq!(artifacts[0].bytes[0x11], 8);
        assert_eq!(artifacts[0].len(), 18 + 56 * 16 * 4);
        assert!(!flags.any_busy());
    }

    #[tokio::test]
    async fn export_image_rejects_concurrent_export() {
        let flags = BusyFlags::new();
        let _held = flags.acquire(BusyFlag::Image).unwrap();
        let err = export_image(&atlas(), "My_Font", &flags).await.unwrap_err();
        assert!(matches!(err, ExportError::Busy(BusyFlag::Image)));
    }

    #[test]
    fn export_descriptor_builds_identical_pair() {
        let flags = BusyFlags::new();
        let artifacts =
            export_descriptor(&descriptor(), "My_Font", FntPolicy::Reference, &flags).unwrap();
        assert_eq!(names(&artifacts), vec!["My_Font.FNT", "My_Font_HI.FNT"]);
        assert_eq!(artifacts[0].hash(), artifacts[1].hash());
        assert_eq!(&artifacts[0].bytes[..2], b"1\n");
        assert!(!flags.any_busy());
    }

    #[tokio::test]
    async fn export_all_runs_both() {
        let flags = BusyFlags::new();
        let report = export_all(&atlas(), &descriptor(), "My_Font", FntPolicy::Reference, &flags)
            .await
            .unwrap();
        assert!(report.is_ok());
        assert_eq!(report.artifacts().len(), 4);
        assert!(report.errors().is_empty());
        assert!(!flags.any_busy());
    }

    #[tokio::test]
    async fn export_all_skips_descriptor_after_image_failure() {
        let flags = BusyFlags::new();
        let empty = Surface::new(0, 0);
        let report = export_all(&empty, &descriptor(), "My_Font", FntPolicy::Reference, &flags)
            .await
            .unwrap();

        assert!(matches!(report.image, Err(ExportError::Png(_))));
        assert!(report.descriptor.is_none());
        assert!(!report.is_ok());
        assert!(report.artifacts().is_empty());
        assert_eq!(report.errors().len(), 1);
        assert!(!flags.any_busy());
    }

    #[tokio::test]
    async fn export_all_reports_descriptor_failure() {
        let flags = BusyFlags::new();
        let strict_reject = FontDescriptor::new("Łódź", 32.0);
        let report = export_all(&atlas(), &strict_reject, "Lodz", FntPolicy::Strict, &flags)
            .await
            .unwrap();

        assert!(report.image.is_ok());
        assert!(matches!(
            report.descriptor,
            Some(Err(ExportError::Fnt(FntError::NonLatin1Name(_))))
        ));
        assert_eq!(report.artifacts().len(), 2);
        assert!(!flags.any_busy());
    }

    #[tokio::test]
    async fn export_all_rejects_reentry() {
        let flags = BusyFlags::new();
        let _held = flags.acquire(BusyFlag::Processing).unwrap();
        let err = export_all(&atlas(), &descriptor(), "My_Font", FntPolicy::Reference, &flags)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Busy(BusyFlag::Processing)));
        assert!(!flags.is_busy(BusyFlag::Image));
    }

    #[test]
    fn export_blocking_is_deterministic() {
        let a = export_blocking(&atlas(), &descriptor(), "My_Font", FntPolicy::Reference).unwrap();
        let b = export_blocking(&atlas(), &descriptor(), "My_Font", FntPolicy::Reference).unwrap();
        let hashes = |r: &ExportReport| r.artifacts().iter().map(|a| a.hash()).collect::<Vec<_>>();
        assert_eq!(hashes(&a), hashes(&b));
    }

    #[test]
    fn write_artifacts_creates_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let artifact = Artifact {
            file_name: "A.FNT".to_string(),
            bytes: vec![1, 2, 3],
        };
        let paths = write_artifacts(&out, &[&artifact]).unwrap();
        assert_eq!(paths, vec![out.join("A.FNT")]);
        assert_eq!(std::fs::read(&paths[0]).unwrap(), vec![1, 2, 3]);
    }
}
