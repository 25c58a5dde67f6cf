use async_trait::async_trait;
use locport::{LocalizationTable, Platform, codec};
use locport_cli::{Language, Pipeline, Translator, languages};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prefixes every value with the language code. Tables containing a `fail`
/// key are refused and tables containing a `panic` key crash the task.
#[derive(Default)]
struct PrefixTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for PrefixTranslator {
    async fn translate(
        &self,
        table: &LocalizationTable,
        language: Language,
        _request_id: &str,
    ) -> Option<LocalizationTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if table.contains_key("panic") {
            panic!("translator crashed");
        }
        if table.contains_key("fail") {
            return None;
        }
        Some(
            table
                .iter()
                .map(|(k, v)| (k, format!("[{}] {}", language.code, v)))
                .collect(),
        )
    }
}

fn write_source(path: &Path, platform: Platform, entries: &[(&str, &str)]) -> PathBuf {
    let table: LocalizationTable = entries.iter().copied().collect();
    codec::write_file(path, platform, &table, "en").unwrap();
    path.to_path_buf()
}

fn french() -> Language {
    languages::find("fr").unwrap()
}

#[tokio::test]
async fn unparsable_file_does_not_affect_its_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let broken = tmp.path().join("Localization/broken.json");
    std::fs::create_dir_all(broken.parent().unwrap()).unwrap();
    std::fs::write(&broken, "{ not json").unwrap();

    let files = vec![
        write_source(
            &tmp.path().join("App/en.lproj/Localizable.strings"),
            Platform::Ios,
            &[("hello", "Hello")],
        ),
        broken.clone(),
        write_source(
            &tmp.path().join("res/values/strings.xml"),
            Platform::Android,
            &[("title", "Title")],
        ),
    ];

    let translator = Arc::new(PrefixTranslator::default());
    let pipeline = Pipeline::new(translator.clone(), 3);
    let report = pipeline.run(&files, &[french()]).await;

    let french = report.language("French").unwrap();
    assert_eq!(french.success.len(), 2);
    assert_eq!(french.failure.len(), 1);
    assert_eq!(french.failure[0].path, broken);
    assert_eq!(french.failure[0].request_id.len(), 32);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 2);

    let ios = codec::read_file(tmp.path().join("App/fr.lproj/Localizable.strings"), Platform::Ios).unwrap();
    assert_eq!(ios.table.get("hello"), Some("[fr] Hello"));
    let android = codec::read_file(tmp.path().join("res/values-fr/strings.xml"), Platform::Android).unwrap();
    assert_eq!(android.table.get("title"), Some("[fr] Title"));
    assert!(!tmp.path().join("Localization/broken_fr.json").exists());
}

#[tokio::test]
async fn refused_translation_does_not_affect_its_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let files = vec![
        write_source(
            &tmp.path().join("App/en.lproj/Localizable.strings"),
            Platform::Ios,
            &[("hello", "Hello")],
        ),
        write_source(
            &tmp.path().join("res/values/strings.xml"),
            Platform::Android,
            &[("fail", "Broken")],
        ),
        write_source(
            &tmp.path().join("Localization/common.json"),
            Platform::Portal,
            &[("title", "Title")],
        ),
    ];

    let pipeline = Pipeline::new(Arc::new(PrefixTranslator::default()), 3);
    let report = pipeline.run(&files, &[french()]).await;

    let french = report.language("French").unwrap();
    assert_eq!(french.success.len(), 2);
    assert_eq!(french.failure[0].path, files[1]);
    let portal = codec::read_file(tmp.path().join("Localization/common_fr.json"), Platform::Portal).unwrap();
    assert_eq!(portal.table.get("title"), Some("[fr] Title"));
    assert!(!tmp.path().join("res/values-fr").exists());
}

#[tokio::test]
async fn panicking_task_is_recorded_as_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let files = vec![
        write_source(
            &tmp.path().join("a/en.lproj/A.strings"),
            Platform::Ios,
            &[("panic", "Boom")],
        ),
        write_source(
            &tmp.path().join("b/en.lproj/B.strings"),
            Platform::Ios,
            &[("ok", "Fine")],
        ),
    ];

    let pipeline = Pipeline::new(Arc::new(PrefixTranslator::default()), 1);
    let report = pipeline.run(&files, &[french()]).await;

    let french = report.language("French").unwrap();
    assert_eq!(french.failure.len(), 1);
    assert_eq!(french.failure[0].path, files[0]);
    assert_eq!(french.success.len(), 1);
    assert!(tmp.path().join("b/fr.lproj/B.strings").exists());
}

#[tokio::test]
async fn unreadable_and_empty_sources_fail_without_calling_translator() {
    let tmp = tempfile::tempdir().unwrap();
    let broken = tmp.path().join("Localization/broken.json");
    std::fs::create_dir_all(broken.parent().unwrap()).unwrap();
    std::fs::write(&broken, "{ not json").unwrap();
    let empty = tmp.path().join("x/en.lproj/Empty.strings");
    std::fs::create_dir_all(empty.parent().unwrap()).unwrap();
    std::fs::write(&empty, "/* nothing here */\n").unwrap();

    let translator = Arc::new(PrefixTranslator::default());
    let pipeline = Pipeline::new(translator.clone(), 50);
    let report = pipeline.run(&[broken, empty], &[french()]).await;

    assert_eq!(report.failed(), 2);
    assert_eq!(report.saved(), 0);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn languages_are_reported_in_processing_order() {
    let tmp = tempfile::tempdir().unwrap();
    let files = vec![write_source(
        &tmp.path().join("res/values/strings.xml"),
        Platform::Android,
        &[("greeting", "Hello & welcome")],
    )];
    let targets: Vec<Language> = ["de", "pt-BR"]
        .iter()
        .map(|code| languages::find(code).unwrap())
        .collect();

    let pipeline = Pipeline::new(Arc::new(PrefixTranslator::default()), 50);
    let report = pipeline.run(&files, &targets).await;

    let order: Vec<_> = report.languages().map(|(name, _)| name).collect();
    assert_eq!(order, vec!["German", "Brazilian Portuguese"]);
    assert_eq!(report.saved(), 2);

    let brazilian = codec::read_file(tmp.path().join("res/values-pt-rBR/strings.xml"), Platform::Android).unwrap();
    assert_eq!(brazilian.table.get("greeting"), Some("[pt-BR] Hello & welcome"));
}
