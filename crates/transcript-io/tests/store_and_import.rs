use models::{Grade, Semester, Subject, SubjectUpdate, Transcript};
use time::{Duration, OffsetDateTime};
use transcript_io::{
    export_json, import_file, parse_json, FileStore, MemoryStore, TranscriptStore,
    DEFAULT_LIFETIME_DAYS,
};

fn sample() -> Transcript {
    let mut t = Transcript::default();
    let first = t.add_semester();
    first.add_subject();
    first.add_subject();
    first.update_subject(1, SubjectUpdate::Grade(Grade::CPlus)).unwrap();
    first.update_subject(1, SubjectUpdate::Name("Data Structures".into())).unwrap();
    t.add_semester();
    let third = t.add_semester();
    third.subjects.push(Subject {
        name: "Thesis".into(),
        grade: Grade::AMinus,
        credits: 6,
    });
    t
}

#[test]
fn export_then_import_is_identity() {
    let t = sample();
    let json = export_json(&t).unwrap();
    assert_eq!(parse_json(&json).unwrap(), t);
}

#[test]
fn import_file_reads_json_and_yaml() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;

    let json_path = dir.path().join("transcript.json");
    std::fs::write(&json_path, export_json(&sample())?)?;
    assert_eq!(import_file(&json_path)?, sample());

    let yaml_path = dir.path().join("transcript.yaml");
    std::fs::write(
        &yaml_path,
        "- name: Semester 1\n  subjects:\n    - name: Algebra\n      grade: B\n      credits: 3\n",
    )?;
    let t = import_file(&yaml_path)?;
    assert_eq!(
        t,
        Transcript::new(vec![Semester {
            name: "Semester 1".into(),
            subjects: vec![Subject {
                name: "Algebra".into(),
                grade: Grade::B,
                credits: 3,
            }],
        }])
    );
    Ok(())
}

#[test]
fn import_file_rejects_unknown_extension_and_bad_content() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;

    let txt = dir.path().join("transcript.txt");
    std::fs::write(&txt, export_json(&sample())?)?;
    let err = import_file(&txt).unwrap_err();
    assert!(format!("{err}").contains("unsupported file format"));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "[{\"name\": \"S1\", \"subjects\": [")?;
    assert!(import_file(&broken).is_err());

    assert!(import_file(&dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn file_store_round_trip() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().join("nested/store.json"), DEFAULT_LIFETIME_DAYS);

    assert_eq!(store.load()?, None);
    store.save(&sample())?;
    assert_eq!(store.load()?, Some(sample()));
    Ok(())
}

#[test]
fn file_store_expires_after_lifetime() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().join("store.json"), DEFAULT_LIFETIME_DAYS);

    let saved = OffsetDateTime::from_unix_timestamp(1_700_000_000)?;
    store.save_at(&sample(), saved)?;

    let within = saved + Duration::days(364);
    assert_eq!(store.load_at(within)?, Some(sample()));

    let after = saved + Duration::days(366);
    assert_eq!(store.load_at(after)?, None);
    Ok(())
}

#[test]
fn file_store_treats_unreadable_file_as_absent() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("store.json");
    let store = FileStore::new(&path, DEFAULT_LIFETIME_DAYS);

    std::fs::write(&path, "definitely not json")?;
    assert_eq!(store.load()?, None);

    // parses, but holds a zero-credit course
    std::fs::write(
        &path,
        r#"{"saved_at": 1700000000, "transcript": [{"name": "S", "subjects": [{"name": "X", "grade": "A", "credits": 0}]}]}"#,
    )?;
    assert_eq!(store.load()?, None);

    store.save(&sample())?;
    assert_eq!(store.load()?, Some(sample()));
    Ok(())
}

#[test]
fn memory_store_counts_saves() -> eyre::Result<()> {
    let store = MemoryStore::default();
    assert_eq!(store.load()?, None);
    store.save(&sample())?;
    store.save(&Transcript::default())?;
    assert_eq!(store.save_count(), 2);
    assert_eq!(store.load()?, Some(Transcript::default()));

    let seeded = MemoryStore::with(sample());
    assert_eq!(seeded.load()?, Some(sample()));
    Ok(())
}
