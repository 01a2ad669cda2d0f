use darling::{FromDeriveInput, FromMeta};
use syn::Ident;

const ENUM_BEHAVIOURS: &[&str] = &["union", "transparent"];
const STRUCT_BEHAVIOURS: &[&str] = &["container", "stable_container"];
const NO_ENUM_BEHAVIOUR_ERROR: &str = "enums require an \"enum_behaviour\" attribute, \
    e.g., #[ssz(enum_behaviour = \"union\")]";

/// Container-level configuration, parsed from `#[ssz(..)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(ssz))]
pub struct StructOpts {
    #[darling(default)]
    enum_behaviour: Option<String>,
    #[darling(default)]
    struct_behaviour: Option<String>,
    #[darling(default)]
    max_fields: Option<String>,
}

pub enum EnumBehaviour {
    Union,
    Transparent,
}

pub enum StructBehaviour {
    Container,
    StableContainer,
}

impl StructOpts {
    pub fn enum_behaviour(&self) -> EnumBehaviour {
        if self.struct_behaviour.is_some() {
            panic!("struct_behaviour is invalid for enums");
        }

        match self.enum_behaviour.as_deref().expect(NO_ENUM_BEHAVIOUR_ERROR) {
            "union" => EnumBehaviour::Union,
            "transparent" => EnumBehaviour::Transparent,
            other => panic!(
                "{} is an invalid enum_behaviour, use one of {:?}",
                other, ENUM_BEHAVIOURS
            ),
        }
    }

    pub fn struct_behaviour(&self) -> StructBehaviour {
        if self.enum_behaviour.is_some() {
            panic!("enum_behaviour is invalid for structs");
        }

        match self.struct_behaviour.as_deref() {
            None | Some("container") => {
                if self.max_fields.is_some() {
                    panic!("max_fields is invalid for regular containers");
                }
                StructBehaviour::Container
            }
            Some("stable_container") => StructBehaviour::StableContainer,
            Some(other) => panic!(
                "{} is an invalid struct_behaviour, use one of {:?}",
                other, STRUCT_BEHAVIOURS
            ),
        }
    }

    /// The `N` of a `StableContainer[N]`, e.g. `max_fields = "typenum::U8"`.
    pub fn max_fields_type(&self) -> syn::Type {
        let path = self
            .max_fields
            .as_ref()
            .expect("stable_container requires a \"max_fields\" attribute, e.g., #[ssz(struct_behaviour = \"stable_container\", max_fields = \"typenum::U8\")]");

        syn::parse_str(path).expect("max_fields is not a valid type path")
    }
}

/// Field-level configuration, parsed from `#[ssz(..)]`.
#[derive(Debug, Default, FromMeta)]
pub struct FieldOpts {
    #[darling(default)]
    pub with: Option<Ident>,
    #[darling(default)]
    pub skip_serializing: bool,
    #[darling(default)]
    pub skip_deserializing: bool,
}
