use lazyref::prelude::*;
use lazyref::traits::FieldValue;

#[derive(FieldValues)]
struct Tagged<T: FieldValue> {
    id: u64,
    payload: T,
}

fn main() {
    let tagged = Tagged {
        id: 1,
        payload: "data".to_string(),
    };

    assert_eq!(Tagged::<String>::FIELDS, ["id", "payload"]);
    assert_eq!(
        tagged.get_value("payload"),
        Some(Value::Text("data".to_string()))
    );
}
