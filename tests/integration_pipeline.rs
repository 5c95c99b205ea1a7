mod common;

use std::fs;
use std::process::Command;

use pdf_vocab_overlap::extract::{PdfTextExtractor, TextExtractor};
use pdf_vocab_overlap::{PageSelection, RunOptions, WarningCode, run};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn frequency_of(text: &str, word: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix(&format!("{word}: ")))
        .map(str::to_string)
}

#[test]
fn extracts_pdf_pages_and_skips_blank_ones() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("vedas.pdf");

    common::write_text_pdf(
        &input,
        &["Health tips from the Vedas", "", "Ayurveda describes diet and daily routine"],
    )
    .expect("PDF fixture should be created");

    let pages = PdfTextExtractor::default()
        .extract(&input)
        .expect("extraction should succeed");

    let numbers = pages.iter().map(|page| page.page_number).collect::<Vec<_>>();
    assert_eq!(numbers, vec![1, 3]);
    assert!(pages[0].text.contains("Vedas"), "pages: {pages:?}");
    assert!(pages[1].text.contains("Ayurveda"), "pages: {pages:?}");
}

#[test]
fn page_selection_limits_extracted_pages() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("selected.pdf");

    common::write_text_pdf(&input, &["first page", "second page"])
        .expect("PDF fixture should be created");

    let selection = "2".parse::<PageSelection>().expect("selection should parse");
    let pages = PdfTextExtractor::new(Some(selection))
        .extract(&input)
        .expect("extraction should succeed");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].page_number, 2);

    let out_of_range = "9".parse::<PageSelection>().expect("selection should parse");
    assert!(PdfTextExtractor::new(Some(out_of_range)).extract(&input).is_err());
}

#[test]
fn compares_pdf_documents_with_page_provenance() {
    let dir = tempdir().expect("tempdir should be created");
    let first = dir.path().join("spirituality.pdf");
    let second = dir.path().join("health.pdf");
    let out = dir.path().join("output");

    common::write_text_pdf(&first, &["meditation and breath", "breath is life"])
        .expect("PDF fixture should be created");
    common::write_text_pdf(&second, &["diet", "breath exercises"])
        .expect("PDF fixture should be created");

    let report = run(&RunOptions::new(vec![first, second], &out)).expect("run should succeed");
    assert!(report.is_complete(), "report: {report:?}");
    assert_eq!(report.comparisons.len(), 1);

    let frequency = fs::read_to_string(out.join("spirituality_word_frequency.txt"))
        .expect("frequency artifact should exist");
    assert_eq!(frequency_of(&frequency, "breath").as_deref(), Some("2"));
    assert_eq!(frequency_of(&frequency, "and"), None);

    let page_info = fs::read_to_string(out.join("spirituality_page_info.txt"))
        .expect("page info artifact should exist");
    assert_eq!(frequency_of(&page_info, "breath").as_deref(), Some("[1, 2]"));

    let comparison = fs::read_to_string(
        out.join("comparison_spirituality_tokenized_text.txt_health_tokenized_text.txt.txt"),
    )
    .expect("comparison artifact should exist");
    assert_eq!(
        comparison,
        "breath: file1(2), file2(1), pages_file1([1, 2]), pages_file2([2])\n"
    );
}

#[test]
fn three_documents_produce_three_reports() {
    let dir = tempdir().expect("tempdir should be created");
    let out = dir.path().join("output");
    let names = ["alpha", "beta", "gamma"];
    let documents = names
        .iter()
        .map(|name| {
            let path = dir.path().join(format!("{name}.txt"));
            common::create_text_document(&path, &["shared words", "more shared text"])
                .expect("text fixture should be written");
            path
        })
        .collect::<Vec<_>>();

    let report = run(&RunOptions::new(documents, &out)).expect("run should succeed");

    let pairs = report
        .comparisons
        .iter()
        .map(|summary| (summary.first.as_str(), summary.second.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![("alpha", "beta"), ("alpha", "gamma"), ("beta", "gamma")]
    );

    let reports = fs::read_dir(&out)
        .expect("output dir should exist")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("comparison_"))
        .count();
    assert_eq!(reports, 3);
}

#[test]
fn rerunning_produces_identical_artifacts() {
    let dir = tempdir().expect("tempdir should be created");
    let first = dir.path().join("one.txt");
    let second = dir.path().join("two.txt");
    common::create_text_document(&first, &["zeta alpha mu", "alpha omega"])
        .expect("text fixture should be written");
    common::create_text_document(&second, &["omega", "", "alpha beta alpha"])
        .expect("text fixture should be written");

    let snapshot = |out: &std::path::Path| {
        [
            "one_word_frequency.txt",
            "one_page_info.txt",
            "two_word_frequency.txt",
            "two_page_info.txt",
            "comparison_one_tokenized_text.txt_two_tokenized_text.txt.txt",
        ]
        .iter()
        .map(|name| fs::read(out.join(name)).expect("artifact should exist"))
        .collect::<Vec<_>>()
    };

    let out_a = dir.path().join("run_a");
    let out_b = dir.path().join("run_b");
    run(&RunOptions::new(vec![first.clone(), second.clone()], &out_a)).expect("first run");
    run(&RunOptions::new(vec![first, second], &out_b)).expect("second run");

    assert_eq!(snapshot(&out_a), snapshot(&out_b));

    let page_info = fs::read_to_string(out_a.join("two_page_info.txt")).expect("page info");
    assert_eq!(page_info, "alpha: [3, 3]\nbeta: [3]\nomega: [1]\n");
}

#[test]
fn empty_text_document_is_a_warning_not_a_failure() {
    let dir = tempdir().expect("tempdir should be created");
    let blank = dir.path().join("blank.txt");
    let words = dir.path().join("words.txt");
    common::create_text_document(&blank, &["   ", ""]).expect("text fixture should be written");
    common::create_text_document(&words, &["lonely word"]).expect("text fixture should be written");

    let out = dir.path().join("output");
    let report = run(&RunOptions::new(vec![blank, words], &out)).expect("run should succeed");

    assert!(report.is_complete());
    assert_eq!(report.warnings[0].code, WarningCode::ExtractionEmpty);
    assert_eq!(report.comparisons[0].common_words, 0);

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.join("run_report.json")).expect("run report should exist"),
    )
    .expect("run report should be JSON");
    assert_eq!(summary["warnings"][0]["code"], "extraction_empty");
    assert_eq!(summary["documents"][0]["vocabulary"], 0);
}

#[test]
fn cli_exits_with_code_2_when_a_document_is_missing() {
    let dir = tempdir().expect("tempdir should be created");
    let present = dir.path().join("present.txt");
    common::create_text_document(&present, &["some text"]).expect("text fixture should be written");
    let missing = dir.path().join("missing.pdf");
    let out = dir.path().join("cli-out");

    let status = Command::new(env!("CARGO_BIN_EXE_vocab-overlap"))
        .args([
            "run",
            "-o",
            &out.to_string_lossy(),
            &present.to_string_lossy(),
            &missing.to_string_lossy(),
        ])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(2));
    assert!(out.join("present_page_info.txt").is_file());
}

#[test]
fn cli_exits_with_code_0_on_success() {
    let dir = tempdir().expect("tempdir should be created");
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    common::create_text_document(&first, &["Apple orchard"]).expect("text fixture should be written");
    common::create_text_document(&second, &["apple pie"]).expect("text fixture should be written");
    let out = dir.path().join("cli-out");

    let status = Command::new(env!("CARGO_BIN_EXE_vocab-overlap"))
        .args([
            "run",
            "--lowercase",
            "-o",
            &out.to_string_lossy(),
            &first.to_string_lossy(),
            &second.to_string_lossy(),
        ])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(0));
    let comparison = fs::read_to_string(
        out.join("comparison_first_tokenized_text.txt_second_tokenized_text.txt.txt"),
    )
    .expect("comparison artifact should exist");
    assert_eq!(
        comparison,
        "apple: file1(1), file2(1), pages_file1([1]), pages_file2([1])\n"
    );
}
