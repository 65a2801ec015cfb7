//! Load the types to serve from a GraphQL schema file.
//!
//! Every object type other than the root operation types is served. Records
//! are flat: only fields whose type is a scalar are kept, and each of them
//! names a column of the type's table.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_graphql::parser::types::{
    BaseType, FieldDefinition, ServiceDocument, TypeDefinition, TypeKind, TypeSystemDefinition,
};
use thiserror::Error;

use query_engine_translation::translation::{identifier, relation};

use crate::scalars;

/// The scalar a declared field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    Id,
    String,
    Int,
    Float,
    Boolean,
    Date,
    /// A scalar declared in the schema file; its text is passed through.
    Custom(String),
}

impl ScalarKind {
    fn builtin(name: &str) -> Option<ScalarKind> {
        match name {
            "ID" => Some(ScalarKind::Id),
            "String" => Some(ScalarKind::String),
            "Int" => Some(ScalarKind::Int),
            "Float" => Some(ScalarKind::Float),
            "Boolean" => Some(ScalarKind::Boolean),
            scalars::DATE => Some(ScalarKind::Date),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ScalarKind::Id => "ID",
            ScalarKind::String => "String",
            ScalarKind::Int => "Int",
            ScalarKind::Float => "Float",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Date => scalars::DATE,
            ScalarKind::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredField {
    pub name: String,
    pub description: Option<String>,
    pub scalar: ScalarKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<DeclaredField>,
}

impl DeclaredType {
    /// The root field fetching one record: `User` is served as `user`.
    pub fn single_field_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// The root field fetching every record: `User` is served as `users`.
    pub fn multiple_field_name(&self) -> String {
        format!("{}s", self.single_field_name())
    }
}

/// The types declared by a schema file, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    pub types: Vec<DeclaredType>,
    pub custom_scalars: Vec<String>,
}

impl TypeRegistry {
    pub fn get(&self, type_name: &str) -> Option<&DeclaredType> {
        self.types.iter().find(|declared| declared.name == type_name)
    }
}

/// Schema loading errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to parse schema: {0}")]
    Parse(#[from] async_graphql::parser::Error),
    #[error("type {type_name} cannot be served: {source}")]
    InvalidType {
        type_name: String,
        source: query_engine_translation::translation::error::Error,
    },
    #[error("field {type_name}.{field_name} cannot be served: {source}")]
    InvalidField {
        type_name: String,
        field_name: String,
        source: query_engine_translation::translation::error::Error,
    },
    #[error("types {first} and {second} would both be served as the root field {field}")]
    ConflictingRootField {
        field: String,
        first: String,
        second: String,
    },
    #[error("the schema declares no object types to serve")]
    NoTypes,
}

/// Read and load a schema file.
pub async fn load_schema_file(path: impl AsRef<Path>) -> Result<TypeRegistry, Error> {
    let path = path.as_ref();
    let sdl = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let registry = parse_schema_sdl(&sdl)?;
    tracing::info!(
        path = %path.display(),
        types = registry.types.len(),
        "loaded schema"
    );
    Ok(registry)
}

/// Load the declared types from schema definition language text.
pub fn parse_schema_sdl(sdl: &str) -> Result<TypeRegistry, Error> {
    let document = async_graphql::parser::parse_schema(sdl)?;
    let roots = root_operation_types(&document);
    let custom_scalars = custom_scalars(&document);

    let mut types: Vec<DeclaredType> = vec![];
    for definition in type_definitions(&document) {
        let TypeKind::Object(object) = &definition.kind else {
            continue;
        };
        let type_name = definition.name.node.as_str();
        if roots.contains(type_name) {
            continue;
        }

        identifier::table_name(&relation::derive_table_name(type_name)).map_err(|source| {
            Error::InvalidType {
                type_name: type_name.to_string(),
                source,
            }
        })?;

        let mut fields = vec![];
        for field in &object.fields {
            if let Some(declared) = declared_field(type_name, &field.node, &custom_scalars)? {
                fields.push(declared);
            }
        }

        // `extend type` adds fields to a type declared earlier
        if let Some(existing) = types.iter_mut().find(|declared| declared.name == type_name) {
            existing.fields.extend(fields);
            continue;
        }

        types.push(DeclaredType {
            name: type_name.to_string(),
            description: definition
                .description
                .as_ref()
                .map(|description| description.node.clone()),
            fields,
        });
    }

    if types.is_empty() {
        return Err(Error::NoTypes);
    }
    check_root_fields(&types)?;

    Ok(TypeRegistry {
        types,
        custom_scalars: custom_scalars.into_iter().collect(),
    })
}

fn type_definitions(document: &ServiceDocument) -> impl Iterator<Item = &TypeDefinition> {
    document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            TypeSystemDefinition::Type(definition) => Some(&definition.node),
            TypeSystemDefinition::Schema(_) | TypeSystemDefinition::Directive(_) => None,
        })
}

/// `Query`, `Mutation` and `Subscription`, plus whatever a `schema` block names.
fn root_operation_types(document: &ServiceDocument) -> BTreeSet<String> {
    let mut roots: BTreeSet<String> = ["Query", "Mutation", "Subscription"]
        .into_iter()
        .map(str::to_string)
        .collect();
    for definition in &document.definitions {
        if let TypeSystemDefinition::Schema(schema) = definition {
            let schema = &schema.node;
            roots.extend(
                [&schema.query, &schema.mutation, &schema.subscription]
                    .into_iter()
                    .flatten()
                    .map(|name| name.node.to_string()),
            );
        }
    }
    roots
}

fn custom_scalars(document: &ServiceDocument) -> BTreeSet<String> {
    type_definitions(document)
        .filter(|definition| matches!(definition.kind, TypeKind::Scalar))
        .map(|definition| definition.name.node.to_string())
        .filter(|name| ScalarKind::builtin(name).is_none())
        .collect()
}

fn declared_field(
    type_name: &str,
    field: &FieldDefinition,
    custom_scalars: &BTreeSet<String>,
) -> Result<Option<DeclaredField>, Error> {
    let field_name = field.name.node.as_str();
    let ty = &field.ty.node;

    let scalar = match &ty.base {
        BaseType::Named(named) => ScalarKind::builtin(named).or_else(|| {
            custom_scalars
                .contains(named.as_str())
                .then(|| ScalarKind::Custom(named.to_string()))
        }),
        BaseType::List(_) => None,
    };
    let Some(scalar) = scalar else {
        tracing::warn!(
            type_name,
            field_name,
            field_type = %ty,
            "skipping field: only scalar fields can be served"
        );
        return Ok(None);
    };

    identifier::column_name(field_name).map_err(|source| Error::InvalidField {
        type_name: type_name.to_string(),
        field_name: field_name.to_string(),
        source,
    })?;

    Ok(Some(DeclaredField {
        name: field_name.to_string(),
        description: field
            .description
            .as_ref()
            .map(|description| description.node.clone()),
        scalar,
        nullable: ty.nullable,
    }))
}

fn check_root_fields(types: &[DeclaredType]) -> Result<(), Error> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for declared in types {
        for field in [declared.single_field_name(), declared.multiple_field_name()] {
            if let Some(first) = seen.insert(field.clone(), &declared.name) {
                return Err(Error::ConflictingRootField {
                    field,
                    first: first.to_string(),
                    second: declared.name.clone(),
                });
            }
        }
    }
    Ok(())
}
