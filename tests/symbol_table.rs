use jackc::analyzer::{resolve, Scope, SymbolError, SymbolKind, SymbolTable};
use jackc::codegen::Segment;

#[test]
fn indices_are_dense_per_kind() {
    let mut class = SymbolTable::new(Scope::Class);
    assert_eq!(class.define("a", "int", SymbolKind::Field), Ok(0));
    assert_eq!(class.define("s", "int", SymbolKind::Static), Ok(0));
    assert_eq!(class.define("b", "Array", SymbolKind::Field), Ok(1));
    assert_eq!(class.define("c", "boolean", SymbolKind::Field), Ok(2));
    assert_eq!(class.define("t", "char", SymbolKind::Static), Ok(1));

    assert_eq!(class.count(SymbolKind::Field), Ok(3));
    assert_eq!(class.count(SymbolKind::Static), Ok(2));
    assert_eq!(class.index_of("c"), Some(2));
    assert_eq!(class.kind_of("t"), Some(SymbolKind::Static));
    assert_eq!(class.type_of("b"), Some("Array"));
}

#[test]
fn start_subroutine_resets_counters_and_bindings() {
    let mut sub = SymbolTable::new(Scope::Subroutine);
    sub.define("x", "int", SymbolKind::Argument).unwrap();
    sub.define("i", "int", SymbolKind::Local).unwrap();
    sub.define("j", "int", SymbolKind::Local).unwrap();
    assert_eq!(sub.count(SymbolKind::Local), Ok(2));

    sub.start_subroutine();
    assert!(!sub.exists("x"));
    assert!(!sub.exists("i"));
    assert_eq!(sub.count(SymbolKind::Argument), Ok(0));
    assert_eq!(sub.count(SymbolKind::Local), Ok(0));
    assert_eq!(sub.define("j", "char", SymbolKind::Local), Ok(0));
}

#[test]
fn kinds_must_match_the_scope() {
    let mut class = SymbolTable::new(Scope::Class);
    assert_eq!(
        class.define("i", "int", SymbolKind::Local),
        Err(SymbolError::WrongScope {
            kind: SymbolKind::Local,
            scope: Scope::Class
        })
    );
    assert!(matches!(
        class.count(SymbolKind::Argument),
        Err(SymbolError::WrongCountKind { .. })
    ));

    let mut sub = SymbolTable::new(Scope::Subroutine);
    assert!(sub.define("f", "int", SymbolKind::Field).is_err());
    assert!(sub.count(SymbolKind::Static).is_err());
}

#[test]
fn redefinition_is_rejected() {
    let mut sub = SymbolTable::new(Scope::Subroutine);
    sub.define("x", "int", SymbolKind::Argument).unwrap();
    assert_eq!(
        sub.define("x", "int", SymbolKind::Local),
        Err(SymbolError::Redefined("x".to_string()))
    );
    // the failed define does not consume an index
    assert_eq!(sub.count(SymbolKind::Local), Ok(0));
}

#[test]
fn subroutine_scope_shadows_class_scope() {
    let mut class = SymbolTable::new(Scope::Class);
    let mut sub = SymbolTable::new(Scope::Subroutine);
    class.define("x", "int", SymbolKind::Field).unwrap();
    class.define("y", "int", SymbolKind::Static).unwrap();
    sub.define("x", "char", SymbolKind::Local).unwrap();

    let x = resolve(&sub, &class, "x").unwrap();
    assert_eq!(x.kind, SymbolKind::Local);
    assert_eq!(x.ty, "char");
    assert_eq!(resolve(&sub, &class, "y").unwrap().kind, SymbolKind::Static);
    assert!(resolve(&sub, &class, "Output").is_none());
}

#[test]
fn kinds_map_to_segments() {
    assert_eq!(SymbolKind::Static.segment(), Segment::Static);
    assert_eq!(SymbolKind::Field.segment(), Segment::This);
    assert_eq!(SymbolKind::Argument.segment(), Segment::Argument);
    assert_eq!(SymbolKind::Local.segment(), Segment::Local);
}
