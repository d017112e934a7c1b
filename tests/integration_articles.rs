// tests/integration_articles.rs
use std::fs;
use std::io::BufReader;

use supercat_core::articles::{load_score_table, load_score_table_file, score_articles};
use supercat_core::error::SupercatError;
use supercat_core::sink::{OutputFormat, ResultSink};

const SCORES: &str = "\
Contracts> Arts: 0, Law: 3, 
Opera> Arts: 2, Law: 0, 
Law> Arts: 1, Law: 1, 
";

#[test]
fn test_articles_are_normalized() {
    let (table, skipped) = load_score_table(SCORES.as_bytes()).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(skipped, 0);

    let articles = "Mozart> Opera Unknown\nJudge_Dredd> Contracts Law\nNobody> Unknown\nno separator\n";
    let sink = ResultSink::new(Vec::new(), OutputFormat::Text, None);
    let stats = score_articles(articles.as_bytes(), &table, &sink).unwrap();
    let out = String::from_utf8(sink.finish().unwrap()).unwrap();

    assert_eq!(stats.lines, 4);
    assert_eq!(stats.emitted, 2);
    assert_eq!(stats.unmatched, 1);
    assert_eq!(stats.malformed, 1);
    assert_eq!(
        out,
        "Mozart> Arts: 1, Law: 0, \nJudge_Dredd> Arts: 0.2, Law: 0.8, \n"
    );
}

#[test]
fn test_score_table_from_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("category_scores.txt");
    fs::write(&path, format!("{SCORES}garbage line\n")).unwrap();

    let (table, skipped) = load_score_table_file(&path).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(skipped, 1);
    assert_eq!(table["Opera"]["Arts"], 2.0);

    let reader = BufReader::new("Carmen> Opera\n".as_bytes());
    let sink = ResultSink::new(Vec::new(), OutputFormat::Text, Some(2));
    score_articles(reader, &table, &sink).unwrap();
    let out = String::from_utf8(sink.finish().unwrap()).unwrap();
    assert_eq!(out, "Carmen> Arts: 1.00, Law: 0.00, \n");
}

#[test]
fn test_missing_score_table() {
    let d = tempfile::tempdir().unwrap();
    let err = load_score_table_file(&d.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, SupercatError::MissingInput(_)));
}

#[test]
fn test_invalid_utf8_article_is_skipped() {
    let (table, _) = load_score_table("X> Arts: 1, Law: 1, \n".as_bytes()).unwrap();
    let articles: &[u8] = b"a1> X\n\xff> X\na2> X\n";

    let sink = ResultSink::new(Vec::new(), OutputFormat::Text, None);
    let stats = score_articles(articles, &table, &sink).unwrap();
    let out = String::from_utf8(sink.finish().unwrap()).unwrap();

    assert_eq!(stats.emitted, 2);
    assert_eq!(stats.malformed, 1);
    assert_eq!(out, "a1> Arts: 0.5, Law: 0.5, \na2> Arts: 0.5, Law: 0.5, \n");
}

#[test]
fn test_invalid_utf8_score_line_is_skipped() {
    let scores: &[u8] = b"A> Law: 1, \n\xffB> Law: 2, \nC> Arts: 3, \n";
    let (table, skipped) = load_score_table(scores).unwrap();
    assert_eq!(skipped, 1);
    assert_eq!(table.len(), 2);
    assert!(table.contains_key("C"));
}
