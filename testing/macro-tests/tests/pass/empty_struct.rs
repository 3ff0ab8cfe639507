use lazyref::prelude::*;

#[derive(FieldValues)]
struct Nothing {}

fn main() {
    let mut nothing = Nothing {};

    assert!(Nothing::FIELDS.is_empty());
    assert_eq!(nothing.get_value("anything"), None);
    assert!(nothing.try_set_value("anything", &Value::Unit).is_err());
}
