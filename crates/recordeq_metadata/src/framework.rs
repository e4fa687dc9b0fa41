//! A minimal base-class-library surface.
//!
//! Compiled units reference framework types they do not define. Hosts that
//! populate a [`Module`] by hand (tests, tools emitting metadata directly)
//! call [`install`] to get the definitions the weaver resolves by name: the
//! root object, `System.String`, the collection interfaces and classes,
//! ``EqualityComparer`1`` and the deep comparer library
//! (``RecordEq.EnumerableValueComparer`1``, `RecordEq.DeepEqualsAttribute`).
//!
//! Interface lists are flattened the way compilers write them to metadata.

use crate::{MethodDef, MethodDefId, Module, PropertyDef, TypeDef, TypeDefId, TypeRef};

const SYSTEM: &str = "System";
const GENERIC: &str = "System.Collections.Generic";
const COMPARER_LIBRARY: &str = "RecordEq";

#[derive(Debug, Clone, Copy)]
pub struct Framework {
  pub object: TypeDefId,
  pub value_type: TypeDefId,
  pub void: TypeDefId,
  pub boolean: TypeDefId,
  pub char: TypeDefId,
  pub int32: TypeDefId,
  pub string: TypeDefId,
  pub type_: TypeDefId,
  pub string_builder: TypeDefId,
  pub array: TypeDefId,
  pub attribute: TypeDefId,

  pub enumerable: TypeDefId,
  pub enumerable_of_t: TypeDefId,
  pub collection_of_t: TypeDefId,
  pub list_of_t: TypeDefId,
  pub read_only_collection_of_t: TypeDefId,
  pub set_of_t: TypeDefId,
  pub dictionary_of_t: TypeDefId,
  pub equality_comparer_of_t: TypeDefId,

  pub list: TypeDefId,
  pub hash_set: TypeDefId,
  pub dictionary: TypeDefId,
  pub key_value_pair: TypeDefId,

  pub equality_comparer: TypeDefId,
  pub equality_comparer_get_default: MethodDefId,
  pub equality_comparer_equals: MethodDefId,
  pub equality_comparer_get_hash_code: MethodDefId,

  pub enumerable_value_comparer: TypeDefId,
  pub enumerable_value_comparer_get_default: MethodDefId,
  pub enumerable_value_comparer_equals: MethodDefId,
  pub enumerable_value_comparer_get_hash_code: MethodDefId,
  pub deep_equals_attribute: TypeDefId,
}

impl Framework {
  pub fn list_of(
    &self,
    element: TypeRef,
  ) -> TypeRef {
    TypeRef::generic(self.list, vec![element])
  }

  pub fn enumerable_of(
    &self,
    element: TypeRef,
  ) -> TypeRef {
    TypeRef::generic(self.enumerable_of_t, vec![element])
  }

  pub fn equality_comparer_of(
    &self,
    ty: TypeRef,
  ) -> TypeRef {
    TypeRef::generic(self.equality_comparer, vec![ty])
  }
}

fn t() -> TypeRef {
  TypeRef::param("T")
}

fn of_t(definition: TypeDefId) -> TypeRef {
  TypeRef::generic(definition, vec![t()])
}

pub fn install(module: &mut Module) -> Framework {
  let object = module.add_type(TypeDef::class(SYSTEM, "Object"));
  let obj = || TypeRef::Def(object);

  let value_type = module.add_type(TypeDef::class(SYSTEM, "ValueType").with_base(obj()).abstract_());
  let void = module.add_type(TypeDef::value_type(SYSTEM, "Void").with_base(TypeRef::Def(value_type)));
  let boolean = module.add_type(TypeDef::value_type(SYSTEM, "Boolean").with_base(TypeRef::Def(value_type)));
  let char = module.add_type(TypeDef::value_type(SYSTEM, "Char").with_base(TypeRef::Def(value_type)));
  let int32 = module.add_type(TypeDef::value_type(SYSTEM, "Int32").with_base(TypeRef::Def(value_type)));
  let type_ = module.add_type(TypeDef::class(SYSTEM, "Type").with_base(obj()).abstract_());
  let string_builder = module.add_type(TypeDef::class("System.Text", "StringBuilder").with_base(obj()));
  let attribute = module.add_type(TypeDef::class(SYSTEM, "Attribute").with_base(obj()).abstract_());

  let enumerable = module.add_type(TypeDef::interface("System.Collections", "IEnumerable"));
  let non_generic = || TypeRef::Def(enumerable);

  let enumerable_of_t = module.add_type(
    TypeDef::interface(GENERIC, "IEnumerable`1")
      .with_generic_params(&["T"])
      .with_interface(non_generic()),
  );
  let collection_of_t = module.add_type(
    TypeDef::interface(GENERIC, "ICollection`1")
      .with_generic_params(&["T"])
      .with_interface(of_t(enumerable_of_t))
      .with_interface(non_generic()),
  );
  let list_of_t = module.add_type(
    TypeDef::interface(GENERIC, "IList`1")
      .with_generic_params(&["T"])
      .with_interface(of_t(collection_of_t))
      .with_interface(of_t(enumerable_of_t))
      .with_interface(non_generic()),
  );
  let read_only_collection_of_t = module.add_type(
    TypeDef::interface(GENERIC, "IReadOnlyCollection`1")
      .with_generic_params(&["T"])
      .with_interface(of_t(enumerable_of_t))
      .with_interface(non_generic()),
  );
  let set_of_t = module.add_type(
    TypeDef::interface(GENERIC, "ISet`1")
      .with_generic_params(&["T"])
      .with_interface(of_t(collection_of_t))
      .with_interface(of_t(enumerable_of_t))
      .with_interface(non_generic()),
  );

  let key_value_pair = module.add_type(
    TypeDef::value_type(GENERIC, "KeyValuePair`2")
      .with_generic_params(&["TKey", "TValue"])
      .with_base(TypeRef::Def(value_type)),
  );
  let pair = || {
    TypeRef::generic(
      key_value_pair,
      vec![TypeRef::param("TKey"), TypeRef::param("TValue")],
    )
  };

  let dictionary_of_t = module.add_type(
    TypeDef::interface(GENERIC, "IDictionary`2")
      .with_generic_params(&["TKey", "TValue"])
      .with_interface(TypeRef::generic(collection_of_t, vec![pair()]))
      .with_interface(TypeRef::generic(enumerable_of_t, vec![pair()]))
      .with_interface(non_generic()),
  );

  let string = module.add_type(
    TypeDef::class(SYSTEM, "String")
      .with_base(obj())
      .with_interface(TypeRef::generic(enumerable_of_t, vec![TypeRef::Def(char)]))
      .with_interface(non_generic()),
  );
  let array = module.add_type(
    TypeDef::class(SYSTEM, "Array")
      .with_base(obj())
      .with_interface(non_generic())
      .abstract_(),
  );

  let list = module.add_type(
    TypeDef::class(GENERIC, "List`1")
      .with_generic_params(&["T"])
      .with_base(obj())
      .with_interface(of_t(list_of_t))
      .with_interface(of_t(collection_of_t))
      .with_interface(of_t(enumerable_of_t))
      .with_interface(non_generic())
      .with_interface(of_t(read_only_collection_of_t)),
  );
  let hash_set = module.add_type(
    TypeDef::class(GENERIC, "HashSet`1")
      .with_generic_params(&["T"])
      .with_base(obj())
      .with_interface(of_t(set_of_t))
      .with_interface(of_t(collection_of_t))
      .with_interface(of_t(enumerable_of_t))
      .with_interface(non_generic())
      .with_interface(of_t(read_only_collection_of_t)),
  );
  let dictionary = module.add_type(
    TypeDef::class(GENERIC, "Dictionary`2")
      .with_generic_params(&["TKey", "TValue"])
      .with_base(obj())
      .with_interface(TypeRef::generic(
        dictionary_of_t,
        vec![TypeRef::param("TKey"), TypeRef::param("TValue")],
      ))
      .with_interface(TypeRef::generic(collection_of_t, vec![pair()]))
      .with_interface(TypeRef::generic(enumerable_of_t, vec![pair()]))
      .with_interface(non_generic())
      .with_interface(TypeRef::generic(read_only_collection_of_t, vec![pair()])),
  );

  let equality_comparer_of_t =
    module.add_type(TypeDef::interface(GENERIC, "IEqualityComparer`1").with_generic_params(&["T"]));

  let boolean_ref = TypeRef::Def(boolean);
  let int32_ref = TypeRef::Def(int32);

  let equality_comparer = module.add_type(
    TypeDef::class(GENERIC, "EqualityComparer`1")
      .with_generic_params(&["T"])
      .with_base(obj())
      .with_interface(of_t(equality_comparer_of_t))
      .abstract_(),
  );
  let (equality_comparer_get_default, equality_comparer_equals, equality_comparer_get_hash_code) =
    add_comparer_members(module, equality_comparer, t(), &boolean_ref, &int32_ref);

  let enumerable_value_comparer = module.add_type(
    TypeDef::class(COMPARER_LIBRARY, "EnumerableValueComparer`1")
      .with_generic_params(&["T"])
      .with_base(obj())
      .with_interface(TypeRef::generic(equality_comparer_of_t, vec![of_t(enumerable_of_t)])),
  );
  let (
    enumerable_value_comparer_get_default,
    enumerable_value_comparer_equals,
    enumerable_value_comparer_get_hash_code,
  ) = add_comparer_members(
    module,
    enumerable_value_comparer,
    of_t(enumerable_of_t),
    &boolean_ref,
    &int32_ref,
  );

  let deep_equals_attribute = module.add_type(
    TypeDef::class(COMPARER_LIBRARY, "DeepEqualsAttribute").with_base(TypeRef::Def(attribute)),
  );

  Framework {
    object,
    value_type,
    void,
    boolean,
    char,
    int32,
    string,
    type_,
    string_builder,
    array,
    attribute,
    enumerable,
    enumerable_of_t,
    collection_of_t,
    list_of_t,
    read_only_collection_of_t,
    set_of_t,
    dictionary_of_t,
    equality_comparer_of_t,
    list,
    hash_set,
    dictionary,
    key_value_pair,
    equality_comparer,
    equality_comparer_get_default,
    equality_comparer_equals,
    equality_comparer_get_hash_code,
    enumerable_value_comparer,
    enumerable_value_comparer_get_default,
    enumerable_value_comparer_equals,
    enumerable_value_comparer_get_hash_code,
    deep_equals_attribute,
  }
}

/// `static Default { get; }`, `Equals(x, y)` and `GetHashCode(obj)` over `operand`.
fn add_comparer_members(
  module: &mut Module,
  owner: TypeDefId,
  operand: TypeRef,
  boolean: &TypeRef,
  int32: &TypeRef,
) -> (MethodDefId, MethodDefId, MethodDefId) {
  let self_ref = module.self_reference(owner);

  let get_default = module.add_method(owner, MethodDef::new("get_Default", self_ref.clone()).static_());
  module.add_property(owner, PropertyDef::new("Default", self_ref).with_getter(get_default));

  let equals = module.add_method(
    owner,
    MethodDef::new("Equals", boolean.clone())
      .with_param("x", operand.clone())
      .with_param("y", operand.clone())
      .virtual_(),
  );
  let get_hash_code = module.add_method(
    owner,
    MethodDef::new("GetHashCode", int32.clone()).with_param("obj", operand).virtual_(),
  );

  (get_default, equals, get_hash_code)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_well_known_names_resolve() {
    let mut module = Module::new("test");
    let fw = install(&mut module);

    assert_eq!(module.find_type("System.Object"), Some(fw.object));
    assert_eq!(module.find_type("System.String"), Some(fw.string));
    assert_eq!(
      module.find_type("System.Collections.Generic.IEnumerable`1"),
      Some(fw.enumerable_of_t)
    );
    assert_eq!(
      module.find_type("RecordEq.EnumerableValueComparer`1"),
      Some(fw.enumerable_value_comparer)
    );
    assert_eq!(module.resolve(&TypeRef::array(TypeRef::Def(fw.int32))), Some(fw.array));
  }

  #[test]
  fn test_comparer_members() {
    let mut module = Module::new("test");
    let fw = install(&mut module);

    let get_default = module.method(fw.equality_comparer_get_default);
    assert!(get_default.is_static);
    assert_eq!(get_default.name, "get_Default");
    assert_eq!(
      module.find_method(fw.enumerable_value_comparer, "GetHashCode"),
      Some(fw.enumerable_value_comparer_get_hash_code)
    );
    assert_eq!(module.method(fw.equality_comparer_equals).params.len(), 2);
  }
}
