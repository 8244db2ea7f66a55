use deliberation::session::{Session, combine_year};

fn load_fixture(json: &str) -> Session {
    serde_json::from_str(json).expect("Failed to parse session fixture")
}

fn semester_1() -> Session {
    load_fixture(include_str!("fixtures/session_s1.json"))
}

fn semester_2() -> Session {
    load_fixture(include_str!("fixtures/session_s2.json"))
}

#[test]
fn test_semester_deliberation() {
    let session = semester_1();
    let results = session.deliberate_all();

    assert_eq!(results.len(), 3);

    // E001: INF101 = (12*3+15*2)/5 = 13.2, MAT102 = (14*4+16*2)/6 = 14.67,
    // semester = (13.2*5 + 14.67*6)/11 = 14.0, full credits
    let e001 = &results[0];
    assert_eq!(e001.average, Some(14.0));
    assert_eq!(e001.credits_earned, 11);
    assert_eq!(e001.total_credits, 11);
    assert_eq!(e001.semester_decision, Some("SV"));
    assert_eq!(e001.decision, Some("S"));
    assert_eq!(e001.mention, Some("Satisfaction"));

    // E002: INF101 = 8.0 on its graded subset (one absence), MAT102 = 9.67,
    // semester = (8*5 + 9.67*6)/11 = 8.91, no credits earned
    let e002 = &results[1];
    assert_eq!(e002.average, Some(8.91));
    assert_eq!(e002.credits_earned, 0);
    assert_eq!(e002.total_credits, 11);
    assert_eq!(e002.semester_decision, Some("SNV"));
    assert_eq!(e002.decision, Some("A"));
    assert_eq!(e002.mention, Some("Ajourné"));

    // E003: INF101 = 11.8 validated, MAT102 = 8.67 not validated,
    // semester = (11.8*5 + 8.67*6)/11 = 10.09 with 5 of 11 credits
    let e003 = &results[2];
    assert_eq!(e003.average, Some(10.09));
    assert_eq!(e003.credits_earned, 5);
    assert_eq!(e003.total_credits, 11);
    assert_eq!(e003.semester_decision, Some("SV"));
    assert_eq!(e003.decision, Some("AUE"));
    assert_eq!(e003.mention, Some("Admis avec UE à rattraper"));
}

#[test]
fn test_second_semester_distinction() {
    let session = semester_2();
    let results = session.deliberate_all();

    // E001: INF201 = 16.0, ANG202 = 16.0, semester = 16.0 with full credits
    let e001 = &results[0];
    assert_eq!(e001.average, Some(16.0));
    assert_eq!(e001.credits_earned, 11);
    assert_eq!(e001.decision, Some("D"));
    assert_eq!(e001.mention, Some("Distinction"));
}

#[test]
fn test_annual_deliberation() {
    let rows = combine_year(&semester_1(), &semester_2());

    assert_eq!(rows.len(), 3);

    // E001: (14.0 + 16.0)/2 = 15.0 with 22/22 credits -> Satisfaction,
    // not Distinction (15 < 16)
    let e001 = &rows[0];
    assert_eq!(e001.average_s1, Some(14.0));
    assert_eq!(e001.average_s2, Some(16.0));
    assert_eq!(e001.annual_average, Some(15.0));
    assert_eq!(e001.credits_earned, 22);
    assert_eq!(e001.total_credits, 22);
    assert_eq!(e001.decision, Some("S"));

    // E002: (8.91 + 10.09)/2 = 9.5 with 6/22 credits -> failed outright
    let e002 = &rows[1];
    assert_eq!(e002.average_s2, Some(10.09));
    assert_eq!(e002.annual_average, Some(9.5));
    assert_eq!(e002.credits_earned, 6);
    assert_eq!(e002.decision, Some("A"));

    // E003: (10.09 + 12.55)/2 = 11.32 with 16/22 credits -> passing average
    // but incomplete credits
    let e003 = &rows[2];
    assert_eq!(e003.average_s2, Some(12.55));
    assert_eq!(e003.annual_average, Some(11.32));
    assert_eq!(e003.credits_earned, 16);
    assert_eq!(e003.total_credits, 22);
    assert_eq!(e003.decision, Some("AUE"));
    assert_eq!(e003.mention, Some("Admis avec UE à rattraper"));
}

#[test]
fn test_invariants_over_fixture_results() {
    for session in [semester_1(), semester_2()] {
        for row in session.deliberate_all() {
            assert!(row.credits_earned <= row.total_credits);
            // average defined iff a decision was reached
            assert_eq!(row.average.is_some(), row.semester_decision.is_some());
        }
    }
    for row in combine_year(&semester_1(), &semester_2()) {
        assert!(row.credits_earned <= row.total_credits);
    }
}
