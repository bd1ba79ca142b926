use rtype_checker::{BaseType, RegistryError, TableFlavour, TypeDescriptor, TypeRegistry, Value};

#[test]
fn registry_rejects_builtin_and_malformed_tags() {
    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.register("list"),
        Err(RegistryError::Builtin("list".to_string()))
    );
    assert_eq!(
        registry.register("data.frame"),
        Err(RegistryError::Builtin("data.frame".to_string()))
    );
    assert_eq!(
        registry.register("1abc"),
        Err(RegistryError::InvalidTag("1abc".to_string()))
    );
    assert_eq!(
        registry.register("my.class_2"),
        Ok(BaseType::Custom("my.class_2".to_string()))
    );
    assert!(registry.is_registered("my.class_2"));
}

#[test]
fn resolve_accepts_r_class_spellings() {
    let registry = TypeRegistry::with_tags(["Money"]).expect("register");
    assert_eq!(registry.resolve("data.frame"), Some(BaseType::DataFrame));
    assert_eq!(registry.resolve("tbl_df"), Some(BaseType::Tibble));
    assert_eq!(registry.resolve("integer"), Some(BaseType::Integer));
    assert_eq!(
        registry.resolve("Money"),
        Some(BaseType::Custom("Money".to_string()))
    );
    assert_eq!(registry.resolve("Unregistered"), None);
}

#[test]
fn any_accepts_everything_and_unknown_nothing() {
    let values = [
        Value::Null,
        Value::integers([1]),
        Value::strings(["a"]),
        Value::Environment,
    ];
    for value in &values {
        assert!(TypeDescriptor::any().accepts(value), "{value:?}");
        assert!(!TypeDescriptor::unknown().accepts(value), "{value:?}");
    }
}

#[test]
fn nullable_descriptors_accept_null() {
    let integer = TypeDescriptor::new(BaseType::Integer);
    assert!(!integer.accepts(&Value::Null));
    assert!(integer.clone().nullable().accepts(&Value::Null));
    assert!(TypeDescriptor::null().accepts(&Value::Null));
}

#[test]
fn numeric_accepts_integers_but_not_the_reverse() {
    let numeric = TypeDescriptor::new(BaseType::Numeric);
    let integer = TypeDescriptor::new(BaseType::Integer);
    assert!(numeric.accepts(&Value::integers([1])));
    assert!(numeric.accepts(&Value::doubles([1.5])));
    assert!(!integer.accepts(&Value::doubles([1.5])));
    assert!(!integer.accepts(&Value::strings(["1"])));
}

#[test]
fn tabular_flavours_are_distinguished() {
    let tibble = Value::table(TableFlavour::Tibble, [("a", Value::integers([1]))]);
    assert!(TypeDescriptor::new(BaseType::DataFrame).accepts(&tibble));
    assert!(TypeDescriptor::new(BaseType::Tibble).accepts(&tibble));
    assert!(!TypeDescriptor::new(BaseType::DataTable).accepts(&tibble));
}

#[test]
fn custom_types_match_on_class() {
    let money = TypeDescriptor::new(BaseType::Custom("money".to_string()));
    assert!(money.accepts(&Value::s3(["money", "numeric"], Value::doubles([1.0]))));
    assert!(!money.accepts(&Value::doubles([1.0])));
}

#[test]
fn equality_ignores_attributes() {
    let plain = TypeDescriptor::new(BaseType::Integer);
    let annotated = TypeDescriptor::new(BaseType::Integer).with_attribute("length", 3);
    assert!(plain.same_type(&annotated));
    assert!(!plain.same_type(&TypeDescriptor::new(BaseType::Numeric)));
}

#[test]
fn describes_descriptors() {
    assert_eq!(TypeDescriptor::new(BaseType::Integer).nullable().describe(), "integer?");
    assert_eq!(TypeDescriptor::null().describe(), "null");
    assert_eq!(TypeDescriptor::new(BaseType::DataTable).describe(), "data_table");
    assert_eq!(
        TypeDescriptor::new(BaseType::S3)
            .with_attribute("class", "lm")
            .to_string(),
        "s3<lm>"
    );
}
