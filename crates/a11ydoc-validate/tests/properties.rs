//! Behavioral properties of the analysis pipeline
//!
//! These tests exercise the registry, the report builder, the section
//! checker and the annotator together on small synthetic documents.

use a11ydoc_ast::{Block, Document, Hyperlink, Location, Paragraph, Run, Table};
use a11ydoc_core::{annotate, check_sections, IssueKind, Report, SectionTemplate};
use a11ydoc_validate::{
    Analyzer, AnalysisEngine, EmptyTableCellsAnalyzer, LayoutTableAnalyzer,
    NonDescriptiveLinkAnalyzer, SmallFontAnalyzer, TableHeaderAnalyzer, TableUsageAnalyzer,
    UnstyledHeadingAnalyzer,
};

/// A syllabus-like document that trips a broad set of analyzers
fn syllabus() -> Document {
    let mut doc = Document::new();
    doc.push(Block::Paragraph(Paragraph::new(vec![Run::bold(
        "Course Overview",
    )])));
    doc.push(Block::Paragraph(Paragraph::text(
        "- Read the first chapter before class",
    )));
    doc.push(Block::Paragraph(Paragraph::new(vec![
        Run::new("Small print").with_size(9.0)
    ])));
    doc.push(Block::Paragraph(Paragraph::text("Midterm\t\t30%")));

    let mut link_para = Paragraph::default();
    let id = link_para.add_hyperlink(Hyperlink::external("https://uwm.edu/handbook.pdf"));
    link_para.runs.push(Run::new("Policies are "));
    link_para.runs.push(Run::new("here").linked(id));
    doc.push(Block::Paragraph(link_para));

    doc.push(Block::Table(Table::from_text(vec![
        vec!["Week", "Topic", ""],
        vec!["1", "Introduction", ""],
        vec!["2", "Research methods", ""],
    ])));
    doc.push(Block::Table(Table::from_text(vec![vec![
        "Instructor: Dr. Ada Lovelace",
    ]])));
    doc
}

fn kinds(analyzer: &dyn Analyzer, doc: &Document) -> Vec<IssueKind> {
    analyzer.analyze(doc).into_iter().map(|i| i.kind).collect()
}

#[test]
fn sections_are_never_both_present_and_missing() {
    let template = SectionTemplate::default()
        .with_section("Course Overview", ["course overview", "overview"])
        .with_section("Instructor", ["instructor", "professor"])
        .with_section("Calendar", ["calendar", "schedule"])
        .with_section("Grading Scale", ["grading scale"]);

    for doc in [syllabus(), Document::new()] {
        let check = check_sections(&doc, &template);
        for name in &check.present {
            assert!(!check.missing.contains(name), "{name} in both lists");
        }
        assert_eq!(check.present.len() + check.missing.len(), template.len());
    }

    let check = check_sections(&syllabus(), &template);
    assert_eq!(check.missing, vec!["Calendar", "Grading Scale"]);
}

#[test]
fn table_analyzers_are_silent_without_tables() {
    let mut doc = syllabus();
    doc.blocks.retain(|b| matches!(b, Block::Paragraph(_)));
    assert_eq!(doc.table_count(), 0);

    let analyzers: [&dyn Analyzer; 6] = [
        &TableHeaderAnalyzer,
        &LayoutTableAnalyzer,
        &TableUsageAnalyzer,
        &EmptyTableCellsAnalyzer,
        &a11ydoc_validate::MergedCellsAnalyzer,
        &a11ydoc_validate::TableCaptionAnalyzer,
    ];
    for analyzer in analyzers {
        assert!(analyzer.analyze(&doc).is_empty(), "{}", analyzer.name());
    }
}

#[test]
fn analyzing_twice_yields_identical_reports() {
    let engine = AnalysisEngine::with_defaults();
    let doc = syllabus();
    let first = engine.run(&doc).report();
    let second = engine.run(&doc).report();
    assert_eq!(first, second);
    assert!(first.issue_count() > 0);
}

#[test]
fn analyzer_order_does_not_change_report() {
    let doc = syllabus();
    let forward = AnalysisEngine::with_defaults();

    // Same analyzers registered in reverse order
    let mut reversed = AnalysisEngine::new();
    let mut boxed: Vec<Box<dyn Analyzer>> = vec![
        Box::new(a11ydoc_validate::HeadingStructureAnalyzer),
        Box::new(TableHeaderAnalyzer),
        Box::new(LayoutTableAnalyzer),
        Box::new(TableUsageAnalyzer),
        Box::new(EmptyTableCellsAnalyzer),
        Box::new(a11ydoc_validate::MergedCellsAnalyzer),
        Box::new(a11ydoc_validate::TableCaptionAnalyzer),
        Box::new(UnstyledHeadingAnalyzer),
        Box::new(SmallFontAnalyzer),
        Box::new(a11ydoc_validate::DecorativeFontAnalyzer),
        Box::new(a11ydoc_validate::InconsistentFontsAnalyzer),
        Box::new(a11ydoc_validate::ContrastAnalyzer),
        Box::new(a11ydoc_validate::LineSpacingAnalyzer),
        Box::new(a11ydoc_validate::JustificationAnalyzer),
        Box::new(a11ydoc_validate::AllCapsAnalyzer),
        Box::new(a11ydoc_validate::ExcessiveFormattingAnalyzer),
        Box::new(a11ydoc_validate::LongSentenceAnalyzer),
        Box::new(a11ydoc_validate::ManualListAnalyzer),
        Box::new(a11ydoc_validate::ListHierarchyAnalyzer),
        Box::new(a11ydoc_validate::LayoutListAnalyzer),
        Box::new(a11ydoc_validate::PseudoTableAnalyzer),
        Box::new(a11ydoc_validate::RawUrlLinkAnalyzer),
        Box::new(NonDescriptiveLinkAnalyzer),
        Box::new(a11ydoc_validate::UnderlineNonLinkAnalyzer),
        Box::new(a11ydoc_validate::LongUrlAnalyzer),
        Box::new(a11ydoc_validate::PdfLinkAnalyzer),
        Box::new(a11ydoc_validate::TocAnalyzer),
        Box::new(a11ydoc_validate::ImageAnalyzer),
        Box::new(a11ydoc_validate::MetadataAnalyzer),
    ];
    assert_eq!(boxed.len(), forward.analyzer_count());
    boxed.reverse();
    for analyzer in boxed {
        reversed.add_analyzer(analyzer);
    }

    let expected = forward.run(&doc).report();
    assert_eq!(reversed.run(&doc).report(), expected);
    assert_eq!(forward.run_parallel(&doc).report(), expected);
}

#[test]
fn mostly_bold_unpunctuated_paragraph_is_an_unstyled_heading() {
    let text = "Course Policies And Expectations For The Fall Semester Terms";
    assert_eq!(text.chars().count(), 60);
    let (bold, plain) = text.split_at(54);

    let mut doc = Document::new();
    doc.push(Block::Paragraph(Paragraph::new(vec![
        Run::bold(bold),
        Run::new(plain),
    ])));
    assert_eq!(
        kinds(&UnstyledHeadingAnalyzer, &doc),
        vec![IssueKind::UnstyledHeading]
    );

    let mut doc = Document::new();
    doc.push(Block::Paragraph(Paragraph::new(vec![
        Run::bold(bold),
        Run::new(format!("{}.", plain)),
    ])));
    assert!(kinds(&UnstyledHeadingAnalyzer, &doc).is_empty());
}

#[test]
fn one_by_one_table_is_layout_unless_bold() {
    let mut doc = Document::new();
    doc.push(Block::Table(Table::from_text(vec![vec!["Welcome"]])));
    assert_eq!(kinds(&LayoutTableAnalyzer, &doc), vec![IssueKind::LayoutTable]);

    let mut bold = Table::from_text(vec![vec!["Welcome"]]);
    bold.rows[0].cells[0].paragraphs[0].runs[0].bold = true;
    let mut doc = Document::new();
    doc.push(Block::Table(bold));
    assert!(kinds(&LayoutTableAnalyzer, &doc).is_empty());
    assert!(kinds(&TableHeaderAnalyzer, &doc).is_empty());
}

#[test]
fn nine_point_run_is_small_font_at_its_location() {
    let mut doc = Document::new();
    doc.push(Block::Paragraph(Paragraph::text("Normal text")));
    doc.push(Block::Paragraph(Paragraph::new(vec![
        Run::new("Footnote").with_size(9.0)
    ])));

    let issues = SmallFontAnalyzer.analyze(&doc);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::SmallFont);
    assert_eq!(issues[0].location, Location::TopLevel(1));
}

#[test]
fn duplicate_issues_produce_one_marker() {
    let mut doc = Document::new();
    doc.push(Block::Paragraph(Paragraph::new(vec![
        Run::new("Tiny ").with_size(8.0),
        Run::new("also tiny").with_size(8.0),
    ])));

    let mut issues = SmallFontAnalyzer.analyze(&doc);
    issues.extend(SmallFontAnalyzer.analyze(&doc));
    assert_eq!(issues.len(), 2);

    let marked = annotate(&doc, &issues);
    assert_eq!(marked.markers_inserted, 1);
    let para = marked.document.paragraph(0).unwrap();
    let markers = para.runs.iter().filter(|r| r.text == "[SMALL_FONT] ").count();
    assert_eq!(markers, 1);

    // The count survives in the report
    assert_eq!(Report::from_issues(issues).issue_count(), 2);
}

#[test]
fn click_here_is_non_descriptive_but_a_real_title_is_not() {
    fn doc_with_link(text: &str) -> Document {
        let mut para = Paragraph::default();
        let id = para.add_hyperlink(Hyperlink::external("https://uwm.edu/syllabus"));
        para.runs.push(Run::new(text).linked(id));
        let mut doc = Document::new();
        doc.push(Block::Paragraph(para));
        doc
    }

    assert_eq!(
        kinds(&NonDescriptiveLinkAnalyzer, &doc_with_link("click here")),
        vec![IssueKind::NonDescriptiveLink]
    );
    assert!(kinds(&NonDescriptiveLinkAnalyzer, &doc_with_link("Course syllabus PDF")).is_empty());
}

#[test]
fn full_pipeline_on_syllabus() {
    let doc = syllabus();
    let analysis = AnalysisEngine::with_defaults().run(&doc);
    let found: Vec<IssueKind> = analysis.issues.iter().map(|i| i.kind).collect();

    for expected in [
        IssueKind::MissingH1,
        IssueKind::UnstyledHeading,
        IssueKind::ManualList,
        IssueKind::SmallFont,
        IssueKind::PseudoTable,
        IssueKind::NonDescriptiveLink,
        IssueKind::PdfLink,
        IssueKind::TableNoHeader,
        IssueKind::EmptyTableColumn,
        IssueKind::LayoutTable,
        IssueKind::TableMissingCaption,
        IssueKind::MissingTitle,
        IssueKind::MissingLanguage,
    ] {
        assert!(found.contains(&expected), "expected {expected}");
    }

    let before = doc.clone();
    let marked = annotate(&doc, &analysis.issues);
    assert_eq!(doc, before, "annotation must not touch the source");
    assert!(marked.skipped.is_empty());
    assert!(marked.markers_inserted > 0);
}
