//! Cross-document consolidation and ranking.
//!
//! Merges the per-document scored sections into one top-N list. The policy
//! is two-phase: every document contributes its first relevant section
//! before any document contributes a second, which trades pure
//! global-relevance ordering for document diversity in the top results.

use std::collections::HashSet;

use chrono::Local;

use crate::model::{
    ExtractedSection, Report, ReportMetadata, ScoredSection, SubsectionAnalysis,
};

type DedupKey = (String, String, i32);

fn key_of(section: &ScoredSection) -> DedupKey {
    let (document, title, page) = section.key();
    (document.to_string(), title.to_string(), page)
}

/// Phase one: seed the result with one representative per document.
///
/// A document's representative is the first section the model returned for
/// it. Representatives are emitted in the original manifest document order,
/// not processing or score order, and de-duplicated on
/// (document, section_title, page_number).
pub fn pick_representatives(
    manifest_order: &[String],
    all_scored: &[ScoredSection],
) -> Vec<ScoredSection> {
    let mut seeded: Vec<ScoredSection> = Vec::new();
    let mut used: HashSet<DedupKey> = HashSet::new();

    for document in manifest_order {
        let first = all_scored.iter().find(|s| &s.document == document);
        if let Some(section) = first {
            if used.insert(key_of(section)) {
                seeded.push(section.clone());
            }
        }
    }

    seeded
}

/// Phase two: fill remaining slots from the full accumulated list.
///
/// Sections are taken in the list's original order, skipping anything the
/// seed already used, until `top_n` entries exist or the source is
/// exhausted. The result never exceeds `top_n`.
pub fn backfill(
    seeded: Vec<ScoredSection>,
    all_scored: &[ScoredSection],
    top_n: usize,
) -> Vec<ScoredSection> {
    let mut result = seeded;
    let mut used: HashSet<DedupKey> = result.iter().map(key_of).collect();

    for section in all_scored {
        if result.len() >= top_n {
            break;
        }
        if used.insert(key_of(section)) {
            result.push(section.clone());
        }
    }

    result.truncate(top_n);
    result
}

/// Consolidate scored sections into the final ranked lists.
///
/// `importance_rank` is the 1-based position in the final list; the
/// subsection analysis is index-aligned with it, carrying each summary as
/// `refined_text`.
pub fn consolidate(
    manifest_order: &[String],
    all_scored: &[ScoredSection],
    top_n: usize,
) -> (Vec<ExtractedSection>, Vec<SubsectionAnalysis>) {
    let seeded = pick_representatives(manifest_order, all_scored);
    let final_list = backfill(seeded, all_scored, top_n);

    let extracted = final_list
        .iter()
        .enumerate()
        .map(|(idx, s)| ExtractedSection {
            document: s.document.clone(),
            section_title: s.section_title.clone(),
            importance_rank: idx as u32 + 1,
            page_number: s.page_number,
        })
        .collect();

    let analysis = final_list
        .iter()
        .map(|s| SubsectionAnalysis {
            document: s.document.clone(),
            refined_text: s.summary.clone(),
            page_number: s.page_number,
        })
        .collect();

    (extracted, analysis)
}

/// Shape the final report, stamping the build time.
pub fn build_report(
    manifest_order: &[String],
    persona: &str,
    task: &str,
    all_scored: &[ScoredSection],
    top_n: usize,
) -> Report {
    let (extracted_sections, subsection_analysis) =
        consolidate(manifest_order, all_scored, top_n);

    Report {
        metadata: ReportMetadata {
            input_documents: manifest_order.to_vec(),
            persona: persona.to_string(),
            job_to_be_done: task.to_string(),
            processing_timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        },
        extracted_sections,
        subsection_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(document: &str, title: &str, page: i32) -> ScoredSection {
        ScoredSection {
            document: document.into(),
            section_title: title.into(),
            page_number: page,
            summary: format!("summary of {title}"),
        }
    }

    fn order(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_representatives_follow_manifest_order() {
        // Processing order was b, a, c; manifest order is a, b, c.
        let all = vec![
            scored("b.pdf", "B1", 1),
            scored("b.pdf", "B2", 2),
            scored("a.pdf", "A1", 1),
            scored("c.pdf", "C1", 4),
        ];
        let seeded = pick_representatives(&order(&["a.pdf", "b.pdf", "c.pdf"]), &all);
        assert_eq!(
            seeded.iter().map(|s| s.document.as_str()).collect::<Vec<_>>(),
            vec!["a.pdf", "b.pdf", "c.pdf"]
        );
        assert_eq!(seeded[1].section_title, "B1");
    }

    #[test]
    fn test_representative_is_first_returned_section() {
        let all = vec![scored("a.pdf", "Second Listed First", 3), scored("a.pdf", "A1", 1)];
        let seeded = pick_representatives(&order(&["a.pdf"]), &all);
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].section_title, "Second Listed First");
    }

    #[test]
    fn test_diversity_before_depth() {
        // 3 documents with ≥2 sections each: the first 3 entries must come
        // from 3 distinct documents in manifest order.
        let all = vec![
            scored("a.pdf", "A1", 1),
            scored("a.pdf", "A2", 2),
            scored("b.pdf", "B1", 1),
            scored("b.pdf", "B2", 2),
            scored("c.pdf", "C1", 1),
            scored("c.pdf", "C2", 2),
        ];
        let (extracted, _) = consolidate(&order(&["a.pdf", "b.pdf", "c.pdf"]), &all, 5);
        assert_eq!(extracted.len(), 5);
        assert_eq!(extracted[0].document, "a.pdf");
        assert_eq!(extracted[1].document, "b.pdf");
        assert_eq!(extracted[2].document, "c.pdf");
        // Backfill resumes in accumulated order.
        assert_eq!(extracted[3].section_title, "A2");
        assert_eq!(extracted[4].section_title, "B2");
    }

    #[test]
    fn test_backfill_never_pads_or_duplicates() {
        let all = vec![scored("a.pdf", "A1", 1), scored("b.pdf", "B1", 1)];
        let (extracted, _) = consolidate(&order(&["a.pdf", "b.pdf"]), &all, 5);
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].importance_rank, 1);
        assert_eq!(extracted[1].importance_rank, 2);
    }

    #[test]
    fn test_duplicate_triples_collapse() {
        let all = vec![
            scored("a.pdf", "A1", 1),
            scored("a.pdf", "A1", 1),
            scored("b.pdf", "B1", 1),
        ];
        let (extracted, _) = consolidate(&order(&["a.pdf", "b.pdf"]), &all, 5);
        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn test_same_title_different_page_is_distinct() {
        let all = vec![scored("a.pdf", "Intro", 1), scored("a.pdf", "Intro", 2)];
        let (extracted, _) = consolidate(&order(&["a.pdf"]), &all, 5);
        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn test_ranks_contiguous_and_capped_at_top_n() {
        let all: Vec<ScoredSection> = (1..=8)
            .map(|i| scored("a.pdf", &format!("S{i}"), i))
            .collect();
        let (extracted, analysis) = consolidate(&order(&["a.pdf"]), &all, 5);
        assert_eq!(extracted.len(), 5);
        let ranks: Vec<u32> = extracted.iter().map(|s| s.importance_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(analysis.len(), 5);
    }

    #[test]
    fn test_analysis_is_index_aligned() {
        let all = vec![scored("a.pdf", "A1", 1), scored("b.pdf", "B1", 7)];
        let (extracted, analysis) = consolidate(&order(&["a.pdf", "b.pdf"]), &all, 5);
        for (section, sub) in extracted.iter().zip(&analysis) {
            assert_eq!(section.document, sub.document);
            assert_eq!(section.page_number, sub.page_number);
        }
        assert_eq!(analysis[1].refined_text, "summary of B1");
    }

    #[test]
    fn test_document_missing_from_scored_is_skipped() {
        let all = vec![scored("b.pdf", "B1", 1)];
        let seeded = pick_representatives(&order(&["a.pdf", "b.pdf"]), &all);
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].document, "b.pdf");
    }

    #[test]
    fn test_varied_top_n() {
        let all = vec![
            scored("a.pdf", "A1", 1),
            scored("b.pdf", "B1", 1),
            scored("c.pdf", "C1", 1),
        ];
        let (extracted, _) = consolidate(&order(&["a.pdf", "b.pdf", "c.pdf"]), &all, 2);
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[1].document, "b.pdf");
    }

    #[test]
    fn test_build_report_metadata() {
        let all = vec![scored("a.pdf", "A1", 1)];
        let report = build_report(&order(&["a.pdf", "b.pdf"]), "X", "Y", &all, 5);
        assert_eq!(report.metadata.input_documents, vec!["a.pdf", "b.pdf"]);
        assert_eq!(report.metadata.persona, "X");
        assert_eq!(report.metadata.job_to_be_done, "Y");
        assert!(report.metadata.processing_timestamp.contains('T'));
        assert_eq!(report.extracted_sections.len(), 1);
    }
}
