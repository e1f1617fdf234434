//! Stack Lab entry point
//!
//! Native host: loads (or generates) one dataset per grade, builds the stacks
//! and runs the stability test on each, delivering one tick per simulated second.

use std::error::Error;
use std::path::Path;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use stack_lab::{
    Category, CategoryPolicy, Record, SessionController, SessionEvent, Settings, StackBuilder,
    StackDefinition, StackRegistry, Transform, ViewSelector,
};

const SETTINGS_PATH: &str = "stack-lab.json";
/// Overrides `Settings::category_policy` ("skip-tag" or "reject-build")
const POLICY_ENV: &str = "STACK_LAB_CATEGORY_POLICY";
/// Overrides `Settings::removed_category` ("glass", "wood" or "stone")
const REMOVED_ENV: &str = "STACK_LAB_REMOVED_CATEGORY";
const DEMO_SEED: u64 = 0x57AC_14B5;
const DEMO_GRADES: [&str; 3] = ["6th", "7th", "8th"];
const DEMO_RECORDS_PER_GRADE: u32 = 16;
/// Distance between neighbouring stacks on the table
const STACK_SPACING: f32 = 2.0;

fn main() {
    env_logger::init();
    log::info!("Stack Lab starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut settings = Settings::load(SETTINGS_PATH)?;
    apply_env_overrides(&mut settings);
    log::info!(
        "Removing {} blocks on completion, category policy {}",
        settings.removed_category.tag(),
        settings.category_policy.as_str()
    );
    let paths: Vec<String> = std::env::args().skip(1).collect();

    let datasets = if paths.is_empty() {
        demo_datasets(DEMO_SEED)
    } else {
        let mut datasets = Vec::new();
        for path in &paths {
            datasets.extend(load_dataset(Path::new(path))?);
        }
        datasets
    };

    let mut registry = StackRegistry::new();
    for (i, (name, records)) in datasets.into_iter().enumerate() {
        let anchor = Transform::from_translation(Vec3::new(i as f32 * STACK_SPACING, 0.0, 0.0));
        registry.register(StackDefinition::new(name, anchor, records))?;
    }

    let countdown = settings.countdown_seconds;
    let mut controller = SessionController::new(registry, StackBuilder::new(settings));
    controller.build_all()?;

    let mut views = ViewSelector::from_registry(controller.registry(), ["Menu"])?;
    let names: Vec<String> = controller.registry().names().map(str::to_string).collect();

    for name in &names {
        views.go_to(name)?;
        let stack = controller.current_stack(&views)?;
        println!(
            "\n[{}] view {} - {} units in {} layers",
            stack.name,
            views.current_index()?,
            stack.units().len(),
            stack.layer_count()
        );
        if let Some(top) = stack.units().last() {
            println!("  top block: {}", top.record().summary().replace('\n', " | "));
        }

        report(&controller.start(name, countdown)?);
        while controller.state(name)?.is_running() {
            report(&controller.tick(name)?);
        }

        let stack = controller.stack(name)?;
        println!("  {} units left standing", stack.units().len());
        report(&controller.reset(name)?);
    }

    views.next();
    println!("\nReturned to {}", views.current());
    Ok(())
}

fn report(events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::Started { duration, .. } => println!("  test started ({duration}s)"),
            SessionEvent::Tick { remaining, .. } => println!("  {remaining}"),
            SessionEvent::Completed { removed, .. } => {
                println!("  removed blocks {removed:?}")
            }
            SessionEvent::ModeChanged { mode, .. } => println!("  simulation {mode:?}"),
            SessionEvent::Reset { stack } => println!("  {stack} rebuilt"),
        }
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(
        settings,
        std::env::var(POLICY_ENV).ok().as_deref(),
        std::env::var(REMOVED_ENV).ok().as_deref(),
    );
}

fn apply_overrides(settings: &mut Settings, policy: Option<&str>, removed: Option<&str>) {
    if let Some(v) = policy {
        match CategoryPolicy::from_str(v) {
            Some(policy) => settings.category_policy = policy,
            None => log::warn!("Ignoring {POLICY_ENV}={v}: unknown policy"),
        }
    }
    if let Some(v) = removed {
        match Category::from_tag(v) {
            Some(category) => settings.removed_category = category,
            None => log::warn!("Ignoring {REMOVED_ENV}={v}: unknown category"),
        }
    }
}

/// Read a JSON array of raw records and split it into one layout-ordered
/// dataset per grade, in order of first appearance
fn load_dataset(path: &Path) -> Result<Vec<(String, Vec<Record>)>, Box<dyn Error>> {
    let json = std::fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&json)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());

    let mut datasets = split_by_grade(records);
    if datasets.len() > 1 {
        log::warn!(
            "{} mixes {} grades, building one stack per grade",
            path.display(),
            datasets.len()
        );
    }
    for (_, records) in &mut datasets {
        sort_for_layout(records);
    }
    Ok(datasets)
}

fn split_by_grade(records: Vec<Record>) -> Vec<(String, Vec<Record>)> {
    let mut datasets: Vec<(String, Vec<Record>)> = Vec::new();
    for record in records {
        match datasets.iter_mut().find(|(grade, _)| *grade == record.grade_label) {
            Some((_, group)) => group.push(record),
            None => datasets.push((record.grade_label.clone(), vec![record])),
        }
    }
    datasets
}

/// Stack order: domain, then cluster, then standard id. Stable, so ties keep file order.
fn sort_for_layout(records: &mut [Record]) {
    records.sort_by(|a, b| {
        (&a.domain_label, &a.cluster_label, &a.standard_id)
            .cmp(&(&b.domain_label, &b.cluster_label, &b.standard_id))
    });
}

/// Seeded synthetic datasets, one per demo grade
fn demo_datasets(seed: u64) -> Vec<(String, Vec<Record>)> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut next_id = 1;

    DEMO_GRADES
        .iter()
        .map(|grade| {
            let records = (0..DEMO_RECORDS_PER_GRADE)
                .map(|i| {
                    let id = next_id;
                    next_id += 1;
                    let cluster = i / 4;
                    Record {
                        id,
                        subject_label: "Math".to_string(),
                        grade_label: grade.to_string(),
                        mastery_level: rng.random_range(0..3),
                        domain_id: format!("{grade}.NS"),
                        domain_label: "The Number System".to_string(),
                        cluster_label: format!("Cluster {}", cluster + 1),
                        standard_id: format!("{grade}.NS.{}.{}", cluster + 1, i % 4 + 1),
                        standard_description: format!("Standard {} of {grade} grade", i + 1),
                    }
                })
                .collect();
            (grade.to_string(), records)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, grade: &str, domain: &str, cluster: &str, standard_id: &str) -> Record {
        Record {
            id,
            subject_label: "Math".to_string(),
            grade_label: grade.to_string(),
            mastery_level: 0,
            domain_id: String::new(),
            domain_label: domain.to_string(),
            cluster_label: cluster.to_string(),
            standard_id: standard_id.to_string(),
            standard_description: String::new(),
        }
    }

    #[test]
    fn test_sort_for_layout_orders_domain_cluster_standard() {
        let mut records = vec![
            record(1, "6th", "Ratios", "B", "6.RP.B.3"),
            record(2, "6th", "Geometry", "A", "6.G.A.2"),
            record(3, "6th", "Ratios", "A", "6.RP.A.2"),
            record(4, "6th", "Ratios", "A", "6.RP.A.1"),
            record(5, "6th", "Geometry", "A", "6.G.A.2"),
        ];
        sort_for_layout(&mut records);
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        // Ties (2 and 5) keep their file order
        assert_eq!(ids, vec![2, 5, 4, 3, 1]);
    }

    #[test]
    fn test_overrides_parse_policy_and_category() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, Some("reject-build"), Some("Wood"));
        assert_eq!(settings.category_policy, CategoryPolicy::RejectBuild);
        assert_eq!(settings.removed_category, Category::Wood);

        apply_overrides(&mut settings, Some("queue"), Some("marble"));
        assert_eq!(settings.category_policy, CategoryPolicy::RejectBuild);
        assert_eq!(settings.removed_category, Category::Wood);

        apply_overrides(&mut settings, None, None);
        assert_eq!(settings.removed_category, Category::Wood);
    }

    #[test]
    fn test_split_by_grade_keeps_first_appearance_order() {
        let records = vec![
            record(1, "7th", "D", "C", "S1"),
            record(2, "6th", "D", "C", "S2"),
            record(3, "7th", "D", "C", "S3"),
        ];
        let datasets = split_by_grade(records);
        let names: Vec<&str> = datasets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["7th", "6th"]);
        let seventh: Vec<u32> = datasets[0].1.iter().map(|r| r.id).collect();
        assert_eq!(seventh, vec![1, 3]);
    }
}
