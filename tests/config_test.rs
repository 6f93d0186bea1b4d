// 環境変数・JSONからの設定読み込みの統合テスト
use headerset::config::{COMMA_FIELDS_ENV, ENCODING_ENV};
use headerset::{Config, Encoding, ResponseHeaders};

#[test]
fn test_from_env_defaults() {
    temp_env::with_vars_unset([COMMA_FIELDS_ENV, ENCODING_ENV], || {
        let config = Config::from_env();
        assert_eq!(config, Config::default());
    });
}

#[test]
fn test_from_env_overrides() {
    temp_env::with_vars(
        [
            (COMMA_FIELDS_ENV, Some("Vary, Content-Encoding,,")),
            (ENCODING_ENV, Some("json")),
        ],
        || {
            let config = Config::from_env();
            assert_eq!(
                config.comma_fields,
                vec!["Vary".to_string(), "Content-Encoding".to_string()]
            );
            assert_eq!(config.encoding, Encoding::Json);

            let mut headers = ResponseHeaders::with_config(&config);
            headers.add("Content-Encoding", "gzip, br");
            assert_eq!(headers.lookup("content-encoding"), Some(vec![&b"gzip"[..], &b"br"[..]]));
            assert_eq!(headers.encoding(), Encoding::Json);
        },
    );
}

#[test]
fn test_from_env_empty_disables_splitting() {
    temp_env::with_var(COMMA_FIELDS_ENV, Some(""), || {
        let config = Config::from_env();
        assert!(config.comma_fields.is_empty());

        let mut headers = ResponseHeaders::with_config(&config);
        headers.add("Vary", "Accept-Encoding, Cookie");
        assert_eq!(headers.lookup("Vary"), Some(vec![&b"Accept-Encoding, Cookie"[..]]));
    });
}

#[test]
fn test_from_env_unknown_encoding_falls_back() {
    temp_env::with_var(ENCODING_ENV, Some("yaml"), || {
        let config = Config::from_env();
        assert_eq!(config.encoding, Encoding::Binary);
    });
}

#[test]
fn test_from_json() {
    let config = Config::from_json(r#"{"comma_fields": ["Accept"], "encoding": "binary"}"#).unwrap();
    let headers = ResponseHeaders::with_config(&config);
    assert!(headers.is_comma_separated_field("ACCEPT"));
    assert!(!headers.is_comma_separated_field("Vary"));
}
