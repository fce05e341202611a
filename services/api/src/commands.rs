use clap::Args;
use green_rating::error::AppError;
use green_rating::evaluation::{CriteriaCatalog, ScoreOutcome, ScoringEngine, MAX_SCORE};
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Checklist item ids to mark as selected (comma separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) select: Vec<String>,
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let catalog = CriteriaCatalog::standard();
    catalog.validate()?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let catalog = Arc::new(CriteriaCatalog::standard());
    catalog.validate()?;
    let engine = ScoringEngine::new(catalog.clone());

    let outcome = engine.score(args.select.iter().map(|id| (id.trim(), true)));
    let unknown: Vec<&str> = args
        .select
        .iter()
        .map(|id| id.trim())
        .filter(|id| catalog.item(id).is_none())
        .collect();

    print!("{}", render_score(&catalog, &outcome, &unknown));
    Ok(())
}

pub(crate) fn render_catalog(catalog: &CriteriaCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Criteria catalog ({} points)", catalog.max_score());
    for category in catalog.categories() {
        let _ = writeln!(
            out,
            "\n{} [{}] - {} pts",
            category.title,
            category.id,
            category.max_points()
        );
        let _ = writeln!(out, "  {}", category.description);
        for item in &category.items {
            let _ = writeln!(out, "  {:<4} {:>2}  {}", item.id, item.weight, item.text);
        }
    }
    out
}

pub(crate) fn render_score(
    catalog: &CriteriaCatalog,
    outcome: &ScoreOutcome,
    unknown: &[&str],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total points: {}/{}  Rating: {}",
        outcome.total_points, MAX_SCORE, outcome.rating
    );
    for entry in &outcome.breakdown {
        let title = catalog
            .category(entry.category)
            .map(|category| category.title)
            .unwrap_or(entry.category);
        let _ = writeln!(out, "  {:<32} {:>3}/{:<3}", title, entry.points, entry.max_points);
    }
    if !unknown.is_empty() {
        let _ = writeln!(out, "Ignored unknown ids: {}", unknown.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use green_rating::evaluation::Rating;

    #[test]
    fn catalog_listing_includes_every_item() {
        let catalog = CriteriaCatalog::standard();

        let rendered = render_catalog(&catalog);

        assert!(rendered.starts_with("Criteria catalog (100 points)"));
        assert!(rendered.contains("Water Conservation [water] - 25 pts"));
        for id in catalog.item_ids() {
            assert!(rendered.contains(&format!("  {id:<4}")), "missing {id}");
        }
    }

    #[test]
    fn score_report_lists_breakdown_and_ignored_ids() {
        let catalog = Arc::new(CriteriaCatalog::standard());
        let engine = ScoringEngine::new(catalog.clone());
        let outcome = engine.score(
            ["s4", "w1", "w3", "w5", "e1", "e4", "e5"]
                .into_iter()
                .map(|id| (id, true)),
        );
        assert_eq!(outcome.rating, Rating::Certified);

        let rendered = render_score(&catalog, &outcome, &["zz9"]);

        assert!(rendered.starts_with("Total points: 45/100  Rating: Certified"));
        assert!(rendered.contains("Energy Efficiency"));
        assert!(rendered.ends_with("Ignored unknown ids: zz9\n"));
    }
}
