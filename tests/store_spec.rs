use chrono::Utc;
use mairis_prime::db::Database;
use mairis_prime::models::*;
use mairis_prime::store::{self, ImportError, KnowledgeStore, STORAGE_KEY};
use speculate2::speculate;

fn report(id: &str) -> ResearchReport {
    ResearchReport {
        id: id.to_string(),
        title: format!("Report {}", id),
        timestamp: Utc::now(),
        journal_name: String::new(),
        hypothesis: Hypothesis {
            title: "h".to_string(),
            statement: "s".to_string(),
            supporting_evidence: String::new(),
            methodology: String::new(),
            expected_contribution: String::new(),
            verification_analysis: VerificationAnalysis::default(),
            is_optimization_focus: false,
        },
        verification_suite: None,
        literature_review: String::new(),
        methodology: String::new(),
        formal_proof: String::new(),
        results_preview: String::new(),
        conclusion: String::new(),
        evidence_data: vec![],
        chart_data: ChartSeries::default(),
        simulation_summary: None,
        is_breakthrough: false,
        visual_url: None,
    }
}

fn with_statuses(statuses: [u8; 5]) -> RocketKnowledgeState {
    let mut state = RocketKnowledgeState::genesis();
    for (key, status) in SubsystemKey::ALL.into_iter().zip(statuses) {
        state.subsystems.get_mut(key).status = status;
    }
    state
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
        let store = KnowledgeStore::new(db.clone());
    }

    describe "select_priority_target" {
        it "targets avionics from genesis" {
            let target = store::select_priority_target(&RocketKnowledgeState::genesis(), None);
            assert_eq!(target, SubsystemKey::Avionics);
        }

        it "returns the subsystem with the lowest status" {
            let state = with_statuses([40, 30, 50, 60, 20]);
            assert_eq!(store::select_priority_target(&state, None), SubsystemKey::Fuel);
        }

        it "breaks ties by enumeration order" {
            let state = with_statuses([50, 10, 30, 10, 10]);
            assert_eq!(store::select_priority_target(&state, None), SubsystemKey::Thermal);
        }

        it "honours a pinned override over the weakest subsystem" {
            let state = RocketKnowledgeState::genesis();
            let target = store::select_priority_target(&state, Some(SubsystemKey::Structural));
            assert_eq!(target, SubsystemKey::Structural);
        }
    }

    describe "merge" {
        it "prepends the new report" {
            let current = RocketKnowledgeState::genesis();
            let once = store::merge(&current, current.clone(), report("a"));
            let twice = store::merge(&once, once.clone(), report("b"));

            let ids: Vec<&str> = twice.past_reports.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["b", "a"]);
        }

        it "caps history at fifty with the newest first" {
            let mut state = RocketKnowledgeState::genesis();
            for i in 0..60 {
                state = store::merge(&state, state.clone(), report(&format!("r{}", i)));
            }

            assert_eq!(state.past_reports.len(), MAX_PAST_REPORTS);
            assert_eq!(state.past_reports[0].id, "r59");
            assert_eq!(state.past_reports[49].id, "r10");
        }

        it "takes every other field from the next state" {
            let current = RocketKnowledgeState::genesis();
            let mut next = current.clone();
            next.master_design_doc = "Revised".to_string();
            let merged = store::merge(&current, next, report("a"));
            assert_eq!(merged.master_design_doc, "Revised");
        }
    }

    describe "persistence" {
        it "loads genesis when nothing is stored" {
            assert_eq!(store.load(), RocketKnowledgeState::genesis());
        }

        it "round-trips a saved state" {
            let mut state = with_statuses([33, 44, 55, 66, 77]);
            state.cycle_count = 7;
            state = store::merge(&state, state.clone(), report("kept"));
            store.save(&state).expect("save failed");

            assert_eq!(store.load(), state);
        }

        it "round-trips full-precision floats exactly" {
            let mut state = RocketKnowledgeState::genesis();
            state.simulation_telemetry = Some(SimulationTelemetry {
                plasma_pressure: 0.009007886169616057,
                fuel_flow_rate: 42.123456789012345,
                neutron_flux: 3.0999999999999996e12,
                containment_stability: 0.1 + 0.2,
                thermal_gradient: 120.5,
                mhd_convergence: true,
            });
            store.save(&state).expect("save failed");

            assert_eq!(store.load(), state);
        }

        it "trims an oversized stored history to fifty" {
            let mut state = RocketKnowledgeState::genesis();
            state.past_reports = (0..55).map(|i| report(&format!("r{}", i))).collect();
            db.put_document(STORAGE_KEY, &serde_json::to_string(&state).unwrap())
                .expect("write failed");

            let loaded = store.load();
            assert_eq!(loaded.past_reports.len(), MAX_PAST_REPORTS);
            assert_eq!(loaded.past_reports[0].id, "r0");
        }

        it "falls back to genesis when the stored document is corrupt" {
            db.put_document(STORAGE_KEY, "{not json").expect("write failed");
            assert_eq!(store.load(), RocketKnowledgeState::genesis());
        }

        it "survives reopening a file-backed database" {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("lab.db");
            let state = with_statuses([1, 2, 3, 4, 5]);
            {
                let file_db = Database::open(path.clone()).expect("open");
                file_db.migrate().expect("migrate");
                KnowledgeStore::new(file_db).save(&state).expect("save");
            }

            let reopened = Database::open(path).expect("reopen");
            reopened.migrate().expect("migrate");
            assert_eq!(KnowledgeStore::new(reopened).load(), state);
        }
    }

    describe "reset" {
        it "returns genesis twice in a row" {
            store.save(&with_statuses([90, 90, 90, 90, 90])).expect("save");

            let first = store.reset().expect("first reset");
            let after_first = db.get_document(STORAGE_KEY).expect("read").expect("document");
            let second = store.reset().expect("second reset");
            let after_second = db.get_document(STORAGE_KEY).expect("read").expect("document");

            assert_eq!(first, RocketKnowledgeState::genesis());
            assert_eq!(first, second);
            assert_eq!(after_first, after_second);
            assert_eq!(store.load(), RocketKnowledgeState::genesis());
        }
    }

    describe "import" {
        it "rejects a document without subsystems and leaves storage untouched" {
            store.save(&with_statuses([21, 22, 23, 24, 25])).expect("save");
            let before = db.get_document(STORAGE_KEY).expect("read");

            let result = store.import(r#"{"masterDesignDoc":"x","cycleCount":3}"#);

            assert!(matches!(result, Err(ImportError::MissingSubsystems)));
            assert_eq!(db.get_document(STORAGE_KEY).expect("read"), before);
        }

        it "rejects text that is not JSON" {
            let result = store.import("definitely not json");
            assert!(matches!(result, Err(ImportError::NotJson(_))));
            assert!(db.get_document(STORAGE_KEY).expect("read").is_none());
        }

        it "rejects a document missing one subsystem" {
            let mut doc = serde_json::to_value(RocketKnowledgeState::genesis()).unwrap();
            doc["subsystems"].as_object_mut().unwrap().remove("avionics");

            let result = store.import(&doc.to_string());
            assert!(matches!(result, Err(ImportError::Invalid(_))));
        }

        it "accepts an exported document" {
            let state = with_statuses([61, 62, 63, 64, 65]);
            let exported = store::export(&state).expect("export");

            let imported = store.import(&exported).expect("import");
            assert_eq!(imported, state);
            assert_eq!(store.load(), state);
        }

        it "trims an imported history longer than fifty" {
            let mut state = RocketKnowledgeState::genesis();
            state.past_reports = (0..70).map(|i| report(&format!("r{}", i))).collect();

            let imported = store
                .import(&serde_json::to_string(&state).unwrap())
                .expect("import");

            assert_eq!(imported.past_reports.len(), MAX_PAST_REPORTS);
            assert_eq!(imported.past_reports[49].id, "r49");
            assert_eq!(store.load().past_reports.len(), MAX_PAST_REPORTS);
        }

        it "rejects a sixth subsystem" {
            let mut doc = serde_json::to_value(RocketKnowledgeState::genesis()).unwrap();
            doc["subsystems"]["warp"] = doc["subsystems"]["fuel"].clone();

            let result = store.import(&doc.to_string());
            assert!(matches!(result, Err(ImportError::Invalid(_))));
            assert!(db.get_document(STORAGE_KEY).expect("read").is_none());
        }

        it "accepts a document without the optional fields" {
            let doc = serde_json::json!({
                "subsystems": RocketKnowledgeState::genesis().subsystems,
                "masterDesignDoc": "legacy",
                "cycleCount": 2,
                "totalPapersProcessed": 6
            });

            let imported = store.import(&doc.to_string()).expect("import");
            assert!(imported.past_reports.is_empty());
            assert!(imported.breakthroughs.is_empty());
            assert_eq!(imported.cycle_count, 2);
        }
    }
}
