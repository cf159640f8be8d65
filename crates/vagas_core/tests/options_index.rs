use pretty_assertions::assert_eq;
use vagas_core::{Field, FilterOptionsIndex, Job, OptionEntry};

fn jobs() -> Vec<Job> {
    vec![
        Job::new(1)
            .with(Field::Title, "Dev Python")
            .with(Field::Company, "Acme")
            .with(Field::Level, "01 - Júnior")
            .with(Field::Remote, "01 - Sim"),
        Job::new(2)
            .with(Field::Title, "Dev Go")
            .with(Field::Company, "Beta")
            .with(Field::Level, "02 - Pleno")
            .with(Field::Remote, "02 - Não"),
        Job::new(3)
            .with(Field::Title, "Analista")
            .with(Field::Company, "acme labs")
            .with(Field::Level, "   ")
            .with(Field::Remote, "01 - Sim"),
    ]
}

#[test]
fn level_values_are_distinct_non_empty_and_sorted() {
    let index = FilterOptionsIndex::build(&jobs()[..2], &[Field::Level]);
    assert_eq!(index.values(&Field::Level), vec!["01 - Júnior", "02 - Pleno"]);

    let index = FilterOptionsIndex::build(&jobs(), &[Field::Level]);
    assert_eq!(index.values(&Field::Level), vec!["01 - Júnior", "02 - Pleno"]);
}

#[test]
fn entries_carry_occurrence_counts() {
    let index = FilterOptionsIndex::build(&jobs(), &[Field::Remote, Field::Company]);
    assert_eq!(
        index.entries(&Field::Remote),
        &[
            OptionEntry {
                value: "01 - Sim".to_string(),
                count: 2,
            },
            OptionEntry {
                value: "02 - Não".to_string(),
                count: 1,
            },
        ]
    );
    assert_eq!(index.count(&Field::Company, "Acme"), 1);
    assert_eq!(index.count(&Field::Company, "Gamma"), 0);
    assert_eq!(
        index.values(&Field::Company),
        vec!["Acme", "acme labs", "Beta"]
    );
}

#[test]
fn unindexed_fields_have_no_options() {
    let index = FilterOptionsIndex::build(&jobs(), &[Field::Level]);
    assert!(index.entries(&Field::Category).is_empty());
    assert!(index.values(&Field::Company).is_empty());
    assert_eq!(index.values(&Field::Level).len(), 2);
}

#[test]
fn punctuation_and_digits_follow_collation_order() {
    let jobs = vec![
        Job::new(1).with(Field::Company, "10X Tech"),
        Job::new(2).with(Field::Company, "Ágil Software"),
        Job::new(3).with(Field::Company, "1:1 Saúde"),
        Job::new(4).with(Field::Company, "banco"),
        Job::new(5).with(Field::Company, "10X Tech"),
    ];
    let index = FilterOptionsIndex::build(&jobs, &[Field::Company]);
    assert_eq!(
        index.values(&Field::Company),
        vec!["1:1 Saúde", "10X Tech", "Ágil Software", "banco"]
    );
    assert_eq!(index.count(&Field::Company, "10X Tech"), 2);
}

#[test]
fn build_is_deterministic() {
    let fields = [Field::Company, Field::Level, Field::Remote];
    let first = FilterOptionsIndex::build(&jobs(), &fields);
    let second = FilterOptionsIndex::build(&jobs(), &fields);
    assert_eq!(first, second);
}
