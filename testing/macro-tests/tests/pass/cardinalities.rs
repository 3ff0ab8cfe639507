use lazyref::prelude::*;

#[derive(FieldValues)]
struct Inventory {
    owner: Option<String>,
    slots: Vec<u32>,
    sealed: bool,
}

fn main() {
    let mut inv = Inventory {
        owner: None,
        slots: vec![1, 2, 3],
        sealed: false,
    };

    assert_eq!(inv.get_value("owner"), Some(Value::Null));
    assert_eq!(
        inv.get_value("slots"),
        Some(Value::List(vec![
            Value::Uint(1),
            Value::Uint(2),
            Value::Uint(3)
        ]))
    );

    inv.try_set_value("owner", &Value::Text("kel".to_string()))
        .unwrap();
    assert_eq!(inv.owner.as_deref(), Some("kel"));

    inv.try_set_value("slots", &Value::List(vec![Value::Uint(9)]))
        .unwrap();
    assert_eq!(inv.slots, [9]);

    assert!(inv.try_set_value("sealed", &Value::Uint(1)).is_err());
}
