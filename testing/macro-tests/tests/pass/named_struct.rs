use lazyref::{FieldValues, traits::FieldValues as _, value::Value};

#[derive(FieldValues)]
struct Widget {
    id: u64,
    label: String,
}

fn main() {
    let mut widget = Widget {
        id: 7,
        label: "crate".to_string(),
    };

    assert_eq!(Widget::FIELDS, ["id", "label"]);
    assert_eq!(widget.get_value("id"), Some(Value::Uint(7)));

    widget
        .try_set_value("label", &Value::Text("box".to_string()))
        .unwrap();
    assert_eq!(widget.label, "box");
}
