use super::*;

#[test]
fn scalar_accessors_convert_leniently() {
    let mut p = Properties::new();
    p.set_string("count", "12");
    p.set_double("ratio", 1.5);
    p.set_int("flag", 1);

    assert_eq!(p.get_int("count"), 12);
    assert_eq!(p.get_double("count"), 12.0);
    assert_eq!(p.get_int("ratio"), 1);
    assert_eq!(p.get_string("ratio").as_deref(), Some("1.5"));
    assert_eq!(p.get_double("flag"), 1.0);
    assert_eq!(p.get_int("missing"), 0);
    assert_eq!(p.get_string("missing"), None);
}

#[test]
fn overwrite_keeps_insertion_slot() {
    let mut p = Properties::new();
    p.set_int("a", 1);
    p.set_int("b", 2);
    p.set_int("a", 3);

    let keys: Vec<&str> = p.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(p.get_int("a"), 3);
}

#[test]
fn remove_reindexes_later_entries() {
    let mut p = Properties::new();
    p.set_int("a", 1);
    p.set_int("b", 2);
    p.set_int("c", 3);

    assert_eq!(p.remove("a"), Some(Value::Int(1)));
    assert_eq!(p.get_int("b"), 2);
    assert_eq!(p.get_int("c"), 3);
    assert!(!p.contains("a"));
    assert_eq!(p.len(), 2);

    p.set_int("d", 4);
    assert_eq!(p.get_int("d"), 4);
}

#[test]
fn data_round_trips_by_type_and_rejects_other_types() {
    let mut p = Properties::new();
    p.set_data("shared", Arc::new(vec![1u8, 2, 3]));
    p.set_int("plain", 7);

    let got = p.get_data::<Vec<u8>>("shared").unwrap().unwrap();
    assert_eq!(*got, vec![1, 2, 3]);
    assert!(p.get_data::<String>("shared").is_err());
    assert!(p.get_data::<Vec<u8>>("plain").is_err());
    assert!(p.get_data::<Vec<u8>>("missing").unwrap().is_none());
}

#[test]
fn prefix_iteration_strips_prefix() {
    let mut p = Properties::new();
    p.set_string("meta.title", "clip");
    p.set_int("width", 720);
    p.set_double("meta.volume", 0.5);

    let meta: Vec<(&str, &Value)> = p.iter_prefix("meta.").collect();
    assert_eq!(meta.len(), 2);
    assert_eq!(meta[0].0, "title");
    assert_eq!(meta[1].0, "volume");
}

#[test]
fn json_skips_data_entries() {
    let mut p = Properties::new();
    p.set_int("width", 720);
    p.set_string("name", "a");
    p.set_data("blob", Arc::new(5u32));

    let json = p.to_json().unwrap();
    assert_eq!(json, serde_json::json!({"width": 720, "name": "a"}));
}
