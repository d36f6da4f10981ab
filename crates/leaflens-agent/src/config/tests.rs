#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.diagnosis.top_n_alternatives, 3);
        assert_eq!(config.diagnosis.high_risk_threshold, 0.7);
        assert_eq!(config.diagnosis.class_names.len(), 9);
        assert_eq!(config.history.capacity, 5);
        assert!(config.knowledge_base.path.is_none());
        assert_eq!(config.logging.filter, "leaflens=info,warn");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            "[diagnosis]\nhigh_risk_threshold = 0.85\n\n[knowledge_base]\npath = \"kb.json\"\n",
        )
        .unwrap();
        assert_eq!(config.diagnosis.high_risk_threshold, 0.85);
        assert_eq!(config.diagnosis.top_n_alternatives, 3);
        assert_eq!(config.knowledge_base.path.as_deref(), Some("kb.json"));

        let options = config.diagnosis_options();
        assert_eq!(options.high_risk_threshold, 0.85);
        assert_eq!(options.healthy_key, "Healthy");
    }

    #[test]
    fn test_default_class_names_start_with_anthracnose() {
        let names = default_class_names();
        assert_eq!(names.first().map(String::as_str), Some("Anthracnose"));
        assert_eq!(names.last().map(String::as_str), Some("Panama Wilt Disease"));
    }

    #[test]
    fn test_yaml_variant() {
        let path = std::env::temp_dir().join(format!("leaflens-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "history:\n  capacity: 10\n").unwrap();
        let config = Config::from_yaml(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.diagnosis.top_n_alternatives, 3);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::from_toml_str("[diagnosis\n").is_err());
    }
}
