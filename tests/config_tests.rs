#[cfg(test)]
mod config_tests {
    use std::io::Write;
    use tempfile::NamedTempFile;

    use cidrkit::config::{Config, OutputFormat};
    use cidrkit::config_loader::{load_config, load_network_list};

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_summarize_then_split_job() {
        let file = yaml_file(
            r#"
general:
  log_level: debug
networks:
  - 10.0.0.1/24
  - 10.0.1.1/24
split: 4
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("debug"));
        assert_eq!(config.general.format, OutputFormat::Compressed);

        let results = config.apply().unwrap();
        assert_eq!(
            config.render(&results),
            vec!["10.0.0.0/25", "10.0.0.128/25", "10.0.1.0/25", "10.0.1.128/25"]
        );
    }

    #[test]
    fn test_uncompressed_subnet_job() {
        let file = yaml_file(
            r#"
general:
  format: uncompressed
  summarize: false
networks:
  - "2001:db8::/32"
subnet: 33
"#,
        );
        let config = load_config(file.path()).unwrap();
        let results = config.apply().unwrap();
        assert_eq!(
            config.render(&results),
            vec![
                "2001:0db8:0000:0000:0000:0000:0000:0000/33",
                "2001:0db8:8000:0000:0000:0000:0000:0000/33",
            ]
        );
    }

    #[test]
    fn test_invalid_jobs_are_rejected() {
        for content in [
            "networks: []",
            "networks: [10.0.0.0/8]\nsplit: 0",
            "networks: [10.0.0.0/16]\nsubnet: 8",
            "general:\n  log_level: chatty\nnetworks: [10.0.0.0/8]",
            "networks: [10.0.0.0/40]",
            "not yaml: [",
        ] {
            let file = yaml_file(content);
            assert!(load_config(file.path()).is_err(), "{:?} should be rejected", content);
        }
    }

    #[test]
    fn test_missing_file() {
        let file = yaml_file("networks: [10.0.0.0/8]");
        let path = file.path().to_path_buf();
        drop(file);
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_network_list_file() {
        let file = yaml_file("# edge routers\n10.0.0.0/24\n\n10.0.1.0/24  # lab\n2001:db8::/48\n");
        let nets = load_network_list(file.path()).unwrap();
        let text: Vec<String> = nets.iter().map(|n| n.to_string()).collect();
        assert_eq!(text, vec!["10.0.0.0/24", "10.0.1.0/24", "2001:db8::/48"]);

        let bad = yaml_file("10.0.0.0/24\n10.0.0.999/24\n");
        let err = load_network_list(bad.path()).unwrap_err();
        assert!(format!("{:?}", err).contains("line 2"));
    }

    #[test]
    fn test_config_serializes_back() {
        let config: Config = serde_yaml::from_str("networks: ['172.16.10.1/24']").unwrap();
        let text = serde_yaml::to_string(&config).unwrap();
        assert!(text.contains("172.16.10.1/24"));
        let again: Config = serde_yaml::from_str(&text).unwrap();
        assert_eq!(again.networks, config.networks);
    }
}
