use std::path::PathBuf;

use quotecard::{
    AspectMode, CanvasRasterizer, CardRecord, CardRenderOptions, Emphasis, ExportOptions,
    Notifier, Theme, export_batch, export_single, split_with_default_tokens,
};

#[derive(Default)]
struct CountingNotifier {
    successes: usize,
    errors: usize,
}

impl Notifier for CountingNotifier {
    fn success(&mut self, _message: &str) {
        self.successes += 1;
    }

    fn error(&mut self, _message: &str) {
        self.errors += 1;
    }
}

fn template() -> CardRecord {
    CardRecord {
        avatar: None,
        name: "Ada Lovelace".to_string(),
        handle: "ada".to_string(),
        quote: String::new(),
        emphasis: Emphasis {
            bold: true,
            italic: false,
        },
        theme: Theme::Dark,
        stats: None,
    }
}

#[test]
fn bulk_text_renders_one_png_per_entry() {
    let dir = PathBuf::from("target").join("batch_export").join("bulk");
    let _ = std::fs::remove_dir_all(&dir);

    let raw = "La primera frase^\"La segunda*\"en dos líneas^\"   ^\"¿La tercera?";
    let job = split_with_default_tokens(raw);
    assert_eq!(job.len(), 3);

    let options = ExportOptions::new(AspectMode::Square, &dir);
    let mut notifier = CountingNotifier::default();
    let summary = export_batch(
        &job,
        &template(),
        &options,
        &CanvasRasterizer,
        &mut notifier,
    )
    .unwrap();

    assert_eq!(summary.exported, 3);
    assert_eq!(notifier.successes, 1);
    assert_eq!(notifier.errors, 0);
    for (idx, file) in summary.files.iter().enumerate() {
        let expected = format!("quote-{}-cuadrado.png", idx + 1);
        assert_eq!(file.file_name().unwrap().to_string_lossy(), expected);
        let (width, height) = image::image_dimensions(file).unwrap();
        assert_eq!((width, height), (1080, 1080));
    }
}

#[test]
fn empty_bulk_text_produces_no_files() {
    let dir = PathBuf::from("target").join("batch_export").join("empty");
    let _ = std::fs::remove_dir_all(&dir);

    let job = split_with_default_tokens("  ^\"   ^\"  ");
    assert!(job.is_empty());

    let options = ExportOptions::new(AspectMode::Square, &dir);
    let mut notifier = CountingNotifier::default();
    let result = export_batch(
        &job,
        &template(),
        &options,
        &CanvasRasterizer,
        &mut notifier,
    );

    assert!(result.is_err());
    assert_eq!(notifier.errors, 1);
    assert_eq!(notifier.successes, 0);
    assert!(!dir.exists());
}

#[test]
fn single_vertical_export_is_full_size() {
    let dir = PathBuf::from("target").join("batch_export").join("single");
    let _ = std::fs::remove_dir_all(&dir);

    let record = template().for_entry("Una frase para la tarjeta vertical", None);
    let mut notifier = CountingNotifier::default();
    let path = export_single(
        &record,
        &dir,
        &CardRenderOptions::new(AspectMode::Vertical),
        &CanvasRasterizer,
        &mut notifier,
    )
    .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "quote-card-tiktok.png"
    );
    let (width, height) = image::image_dimensions(&path).unwrap();
    assert_eq!((width, height), (1080, 1920));
    assert_eq!(notifier.successes, 1);
}
