use super::export::GenerationRecord;
use super::store::{read_records, write_records};
use crate::engines::evaluation::fitness;
use crate::error::{Result, TreevolveError};
use std::path::Path;

/// Recompute every tree's fitness in every evaluation file of a folder and
/// rewrite the files in place. Used after the scoring formulas change so old
/// runs stay comparable; no field other than `fitness` is touched.
pub fn recalculate_folder<P: AsRef<Path>>(folder: P) -> Result<usize> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(TreevolveError::Export(format!(
            "{} is not a directory",
            folder.display()
        )));
    }

    let mut updated = 0;
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        log::info!("recalculating {}", path.display());
        let mut records = read_records(&path)?;

        for record in &mut records {
            recalculate_generation(record);
        }

        write_records(&path, &records)?;
        updated += 1;
    }

    Ok(updated)
}

fn recalculate_generation(record: &mut GenerationRecord) {
    for tree in &mut record.trees {
        // Records saved without geometry rescore the sentence marks only;
        // the geometry marks then see an empty branch list.
        let branches = tree.branches.as_deref().unwrap_or(&[]);
        tree.fitness = fitness::mark_tree(&tree.fitness.tree_name, branches, &tree.sentence);
    }
}

/// Collect the `count` highest-fitness sentences across every evaluation
/// file in a folder, best first. Feeds the showcase mode that redisplays the
/// best trees of a finished run.
pub fn best_sentences<P: AsRef<Path>>(folder: P, count: usize) -> Result<Vec<String>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(TreevolveError::Export(format!(
            "{} is not a directory",
            folder.display()
        )));
    }

    let mut scored: Vec<(f64, String)> = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        for record in read_records(&path)? {
            for tree in record.trees {
                scored.push((tree.fitness.overall_fitness, tree.sentence));
            }
        }
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    Ok(scored.into_iter().take(count).map(|(_, s)| s).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::export::TreeRecord;
    use crate::engines::generation::lsystem::RuleSet;
    use crate::types::{BranchSegment, Point2};

    fn tree_record(name: &str, sentence: &str, height: f64) -> TreeRecord {
        let branches = vec![BranchSegment::new(Point2::ORIGIN, Point2::new(0.0, height))];
        TreeRecord {
            sentence: sentence.to_string(),
            rules: RuleSet::new(),
            alphabet: vec!['F', '[', ']'],
            final_weight: 0.01,
            final_branch_count: branches.len(),
            branches: Some(branches.clone()),
            fitness: fitness::mark_tree(name, &branches, sentence),
        }
    }

    #[test]
    fn recalculation_round_trips_without_losing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let mut record = GenerationRecord {
            gen_number: 2,
            trees: vec![tree_record("t1", "F[+F]", 2.0)],
        };
        // Corrupt the stored score; recalculation must restore it.
        record.trees[0].fitness.overall_fitness = -5.0;
        write_records(&path, std::slice::from_ref(&record)).unwrap();

        let updated = recalculate_folder(dir.path()).unwrap();
        assert_eq!(updated, 1);

        let back = read_records(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].gen_number, 2);
        let tree = &back[0].trees[0];
        assert_eq!(tree.sentence, "F[+F]");
        assert_eq!(tree.fitness.tree_name, "t1");
        assert!(tree.fitness.overall_fitness > 0.0);
        assert!(tree.branches.is_some());
    }

    #[test]
    fn best_sentences_orders_by_fitness() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![GenerationRecord {
            gen_number: 0,
            trees: vec![
                tree_record("low", "FF", 0.5),
                tree_record("high", "F[+F][-F]", 9.0),
            ],
        }];
        write_records(dir.path().join("run.json"), &records).unwrap();

        let best = best_sentences(dir.path(), 1).unwrap();
        assert_eq!(best, vec!["F[+F][-F]".to_string()]);
    }

    #[test]
    fn missing_folder_is_reported() {
        assert!(recalculate_folder("no/such/folder").is_err());
    }
}
