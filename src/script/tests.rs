use super::*;

fn session(buckets: usize, format: OutputFormat) -> Session {
    let config = TableConfig {
        bucket_count: buckets,
        seed: Some(11),
    };
    Session::from_config(&config, format).unwrap()
}

fn run(session: &mut Session, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_parse_commands() {
    assert_eq!(
        Command::parse("insert apple 1").unwrap(),
        Some(Command::Insert(Scalar::text("apple"), Scalar::Int(1)))
    );
    assert_eq!(
        Command::parse("  SEARCH   42 ").unwrap(),
        Some(Command::Search(Scalar::Int(42)))
    );
    assert_eq!(
        Command::parse(r#"insert "10" "two words""#).unwrap(),
        Some(Command::Insert(Scalar::text("10"), Scalar::text("two words")))
    );
    assert_eq!(
        Command::parse(r#"delete "say \"hi\"""#).unwrap(),
        Some(Command::Delete(Scalar::text("say \"hi\"")))
    );
    assert_eq!(Command::parse("dump").unwrap(), Some(Command::Dump));
    assert_eq!(Command::parse("").unwrap(), None);
    assert_eq!(Command::parse("   # comment").unwrap(), None);
    assert_eq!(Command::parse("len # trailing").unwrap(), Some(Command::Len));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        Command::parse("upsert a 1"),
        Err(CommandError::Unknown("upsert".into()))
    );
    assert_eq!(
        Command::parse("insert a"),
        Err(CommandError::Arity {
            command: "insert",
            expected: 2,
            found: 1
        })
    );
    assert_eq!(
        Command::parse("dump now"),
        Err(CommandError::Arity {
            command: "dump",
            expected: 0,
            found: 1
        })
    );
    assert_eq!(
        Command::parse(r#"search "open"#),
        Err(CommandError::UnterminatedQuote)
    );
    assert_eq!(Command::parse("7 7"), Err(CommandError::Unknown("7".into())));
}

#[test]
fn test_scenario_script() {
    let mut session = session(11, OutputFormat::Text);
    let lines = run(
        &mut session,
        r#"
        insert apple 1
        insert banana 2
        insert 10 ten
        insert apple 99
        search apple
        search banana
        search 42
        delete banana
        delete banana
        len
        "#,
    );
    assert_eq!(
        lines,
        vec![
            "ok",
            "ok",
            "ok",
            "ok (replaced 1)",
            "99",
            "2",
            "not found",
            "true",
            "false",
            "2",
        ]
    );

    let table = session.table();
    assert_eq!(table.search(&Scalar::text("apple")), Some(&Scalar::Int(99)));
    assert_eq!(table.search(&Scalar::Int(10)), Some(&Scalar::text("ten")));
    assert_eq!(table.search(&Scalar::text("banana")), None);

    let rendered = table.to_string();
    assert!(rendered.contains(r#"("apple", 99)"#));
    assert!(rendered.contains(r#"(10, "ten")"#));
    assert!(!rendered.contains("banana"));
}

#[test]
fn test_int_and_text_keys_are_distinct() {
    let mut session = session(5, OutputFormat::Text);
    let lines = run(&mut session, "insert 10 a\ninsert \"10\" b\nsearch 10\nsearch \"10\"\nlen");
    assert_eq!(lines, vec!["ok", "ok", "\"a\"", "\"b\"", "2"]);
}

#[test]
fn test_json_dump_and_stats() {
    let mut session = session(1, OutputFormat::Json);
    let lines = run(&mut session, "insert apple 1\ninsert 10 ten\ndump\nstats");
    assert_eq!(lines[2], r#"[{"index":0,"entries":[["apple",1],[10,"ten"]]}]"#);
    assert_eq!(
        lines[3],
        r#"{"entries":2,"bucket_count":1,"occupied_buckets":1,"longest_chain":2,"load_factor":2.0}"#
    );
}

#[test]
fn test_clear_and_empty_dump() {
    let mut session = session(7, OutputFormat::Text);
    let lines = run(&mut session, "insert a 1\nclear\nlen\ndump");
    assert_eq!(lines, vec!["ok", "cleared", "0", "Empty hash table"]);
}

#[test]
fn test_text_stats() {
    let mut session = session(4, OutputFormat::Text);
    let lines = run(&mut session, "stats");
    assert_eq!(
        lines,
        vec!["entries: 0, buckets: 4, occupied: 0, longest chain: 0, load factor: 0.00"]
    );
}

#[test]
fn test_run_reports_line_of_bad_command() {
    let mut session = session(7, OutputFormat::Text);
    let mut out = Vec::new();
    let err = session
        .run("insert a 1\n\nfrobnicate\ninsert b 2".as_bytes(), &mut out)
        .unwrap_err();

    match err {
        ScriptError::Parse { line, source } => {
            assert_eq!(line, 3);
            assert_eq!(source, CommandError::Unknown("frobnicate".into()));
        }
        other => panic!("unexpected error: {other}"),
    }
    // Lines before the bad one ran; lines after did not
    assert_eq!(session.table().len(), 1);
    assert_eq!(String::from_utf8(out).unwrap(), "ok\n");
}

#[test]
fn test_run_counts_commands() {
    let mut session = session(7, OutputFormat::Text);
    let executed = session
        .run("# header\ninsert a 1\n\nsearch a\n".as_bytes(), &mut std::io::sink())
        .unwrap();
    assert_eq!(executed, 2);
}

#[test]
fn test_oversized_table_is_an_error() {
    let config = TableConfig {
        bucket_count: 1_000_000_000_000_000,
        seed: None,
    };
    let err = Session::from_config(&config, OutputFormat::Text).err().unwrap();
    assert!(matches!(err, TableError::TooManyBuckets { .. }));
    assert_eq!(
        err.to_string(),
        "bucket count 1000000000000000 exceeds the hash range of 1000000007"
    );
}
