// http クレートとの相互変換の統合テスト
use headerset::{Error, RequestHeaders, ResponseHeaders};
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE, SET_COOKIE};
use http::Version;

#[test]
fn test_from_header_map_keeps_duplicates() {
    let mut map = HeaderMap::new();
    map.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
    map.append(SET_COOKIE, HeaderValue::from_static("a=1"));
    map.append(SET_COOKIE, HeaderValue::from_static("b=2"));

    let headers = ResponseHeaders::from_header_map(&map);
    assert_eq!(headers.attribute_count(), 3);
    assert_eq!(headers.lookup("Set-Cookie"), Some(vec![&b"a=1"[..], &b"b=2"[..]]));
    assert_eq!(headers.lookup1("Content-Type"), Some(&b"text/html"[..]));
}

#[test]
fn test_opaque_values_survive_conversion() {
    let mut map = HeaderMap::new();
    map.insert("x-latin1", HeaderValue::from_bytes(b"caf\xe9").unwrap());

    let headers = RequestHeaders::from_header_map(&map);
    assert_eq!(headers.lookup1("X-Latin1"), Some(&b"caf\xe9"[..]));

    let back = headers.to_header_map().unwrap();
    assert_eq!(back.get("x-latin1").unwrap().as_bytes(), b"caf\xe9");
}

#[test]
fn test_to_header_map() {
    let mut headers = ResponseHeaders::new();
    headers.add("Vary", "Accept-Encoding, Cookie");
    headers.add("Set-Cookie", "a=1");
    headers.add("Set-Cookie", "b=2");

    let map = headers.to_header_map().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("vary").unwrap().to_str().unwrap(), "Accept-Encoding, Cookie");
    let cookies: Vec<&str> = map
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

#[test]
fn test_to_header_map_rejects_bad_name() {
    let mut headers = RequestHeaders::new();
    headers.add("Bad Name", "value");
    assert!(matches!(headers.to_header_map(), Err(Error::InvalidHeader(_))));

    let mut headers = RequestHeaders::new();
    headers.add("X-Evil", "a\r\nb");
    assert!(matches!(headers.to_header_map(), Err(Error::InvalidHeader(_))));
}

#[test]
fn test_http_version_roundtrip() {
    let mut headers = RequestHeaders::new();
    headers.set_http_version(Version::HTTP_10);
    assert_eq!(headers.major_version(), Some(1));
    assert_eq!(headers.minor_version(), Some(0));
    assert_eq!(headers.http_version(), Some(Version::HTTP_10));
}
