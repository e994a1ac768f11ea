use anyhow::Result;
use curriculum_map::core::export;
use curriculum_map::{CurriculumError, CurriculumProvider, CurriculumTable, ModuleRef};
use std::collections::BTreeSet;
use tempfile::TempDir;

const ROLES: [&str; 5] = [
    "clinician-scientist",
    "informaticist",
    "investigator",
    "research-leader",
    "software-engineer",
];

#[test]
fn test_builtin_lists_all_roles() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    let roles: BTreeSet<&str> = table.list_roles();
    assert_eq!(roles, ROLES.into_iter().collect::<BTreeSet<_>>());
    assert_eq!(table.len(), 5);
    Ok(())
}

#[test]
fn test_every_role_has_non_empty_curriculum() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    for role in table.list_roles() {
        let modules = table.get_curriculum(role)?;
        assert!(!modules.is_empty(), "{} has no modules", role);
        for module in modules {
            assert!(!module.slug.is_empty());
            assert!(!module.text.is_empty());
        }
    }
    Ok(())
}

#[test]
fn test_unknown_role_is_not_found() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    match table.get_curriculum("not-a-real-role") {
        Err(CurriculumError::RoleNotFound { role }) => assert_eq!(role, "not-a-real-role"),
        other => panic!("expected RoleNotFound, got {:?}", other),
    }
    // 不做大小寫或空白的寬鬆比對
    assert!(table.get_curriculum("Research-Leader").is_err());
    assert!(table.get_curriculum("").is_err());
    Ok(())
}

#[test]
fn test_research_leader_starts_with_fhir_from_10000_ft() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    let modules = table.get_curriculum("research-leader")?;
    assert_eq!(
        modules[0],
        ModuleRef::new("modules/fhir-from-10000-ft", 0, "FHIR from 10,000 Feet")
    );
    assert_eq!(modules.len(), 11);
    Ok(())
}

#[test]
fn test_intro_module_is_shared_by_every_role() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    let roles = table.roles_for_slug("modules/fhir-from-10000-ft");
    assert_eq!(roles, table.list_roles());
    Ok(())
}

#[test]
fn test_curriculum_sizes() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    assert_eq!(table.get_curriculum("clinician-scientist")?.len(), 19);
    assert_eq!(table.get_curriculum("informaticist")?.len(), 28);
    assert_eq!(table.get_curriculum("investigator")?.len(), 22);
    assert_eq!(table.get_curriculum("software-engineer")?.len(), 28);
    Ok(())
}

#[test]
fn test_positions_have_gaps() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    let positions: Vec<u32> = table
        .ordered_curriculum("informaticist")?
        .iter()
        .map(|m| m.position)
        .collect();

    assert!(!positions.contains(&12));
    assert!(!positions.contains(&28));
    assert!(!positions.contains(&33));
    assert_eq!(positions.last(), Some(&35));
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    Ok(())
}

#[test]
fn test_shared_module_has_same_text_across_roles() -> Result<()> {
    let table = CurriculumTable::builtin()?;
    for role in table.list_roles() {
        let module = table
            .get_curriculum(role)?
            .iter()
            .find(|m| m.slug == "modules/new-bulk-fhir");
        if let Some(module) = module {
            assert_eq!(module.text, "Bulk Data Access");
        }
    }
    Ok(())
}

#[test]
fn test_loading_twice_is_identical() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/role_module_map.json");
    let first = CurriculumTable::from_file(path)?;
    let second = CurriculumTable::from_file(path)?;
    assert_eq!(first, second);
    assert_eq!(&first, CurriculumTable::builtin()?);
    Ok(())
}

#[test]
fn test_export_round_trips_through_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let table = CurriculumTable::builtin()?;

    let js_path = temp_dir.path().join("modules/mappings.js");
    export::write_output(&js_path, &export::to_js(table)?)?;
    assert_eq!(&CurriculumTable::from_file(&js_path)?, table);

    let json_path = temp_dir.path().join("role_module_map.json");
    export::write_output(&json_path, &export::to_json(table)?)?;
    assert_eq!(&CurriculumTable::from_file(&json_path)?, table);
    Ok(())
}

#[test]
fn test_provider_trait_object() -> Result<()> {
    let provider: &dyn CurriculumProvider = CurriculumTable::builtin()?;
    assert_eq!(provider.list_roles().len(), 5);
    assert!(provider.get_curriculum("investigator").is_ok());
    Ok(())
}

#[test]
fn test_concurrent_readers() -> Result<()> {
    let handles: Vec<_> = ROLES
        .into_iter()
        .map(|role| {
            std::thread::spawn(move || {
                CurriculumTable::builtin()
                    .and_then(|table| table.get_curriculum(role).map(|m| m.len()))
                    .unwrap_or(0)
            })
        })
        .collect();

    for handle in handles {
        let len = handle.join().map_err(|_| anyhow::anyhow!("reader panicked"))?;
        assert!(len > 0);
    }
    Ok(())
}

#[test]
fn test_rejects_malformed_artifact() {
    let missing_key = r#"[{"role": "investigator"}]"#;
    assert!(CurriculumTable::from_json_str(missing_key).is_err());

    let not_an_array = r#"{"role": "investigator", "modules": []}"#;
    assert!(CurriculumTable::from_json_str(not_an_array).is_err());
}
