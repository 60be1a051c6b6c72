use super::{
    name, Collection, CollectionId, DefaultPolicy, Field, FieldId, FieldTy, Reference,
    ReferenceId, Schema, Table, TableId,
};
use crate::{stmt::Value, Error, Result};

use indexmap::IndexMap;

/// Definition of a field before it is assigned to a table attribute.
#[derive(Debug, Clone)]
pub struct FieldDef {
    ty: FieldTy,
    nullable: bool,
    default: DefaultPolicy,
    size: Option<u32>,
    foreign: Option<FieldId>,
}

/// Definition of a reference before it is assigned to a table attribute.
#[derive(Debug, Clone)]
pub struct RefDef {
    field: FieldId,
    target: TableId,
    backref: Option<String>,
}

/// Something that can be assigned to a table attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Field(FieldId),
    Reference(ReferenceId),
}

/// Builds a [`Schema`] in two phases.
///
/// Fields and references are first created unbound; declaring a table binds
/// each of them to exactly one `(table, attribute)` pair. Attributes that
/// cannot be filled yet, because they point at a table declared later, are
/// declared deferred and assigned afterwards with [`Builder::assign`]. They
/// are bound by the resolution pass in [`Builder::build`].
#[derive(Debug, Default)]
pub struct Builder {
    fields: Vec<FieldSlot>,
    references: Vec<RefSlot>,
    collections: Vec<Collection>,
    tables: Vec<TableDecl>,
    late: Vec<LateAttr>,
}

/// Declares one table; finish with [`TableBuilder::build`].
#[derive(Debug)]
pub struct TableBuilder<'a> {
    builder: &'a mut Builder,
    type_name: String,
    name: Option<String>,
    base: Option<TableId>,
    primary: Option<String>,
    attrs: Vec<(String, Option<Attr>)>,
}

#[derive(Debug, Clone)]
struct Binding {
    table: TableId,
    type_name: String,
    name: String,
}

#[derive(Debug)]
struct FieldSlot {
    def: FieldDef,
    binding: Option<Binding>,
}

#[derive(Debug)]
struct RefSlot {
    def: RefDef,
    binding: Option<Binding>,
    backref: Option<CollectionId>,
}

#[derive(Debug)]
struct TableDecl {
    type_name: String,
    name: String,
    attrs: IndexMap<String, Slot>,
    primary_key: Option<FieldId>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Field(FieldId),
    Reference(ReferenceId),
    Collection(CollectionId),
    Deferred,
}

#[derive(Debug)]
struct LateAttr {
    table: TableId,
    name: String,
    attr: Attr,
}

impl FieldDef {
    pub fn new(ty: FieldTy) -> FieldDef {
        FieldDef {
            ty,
            nullable: false,
            default: DefaultPolicy::None,
            size: None,
            foreign: None,
        }
    }

    pub fn int() -> FieldDef {
        FieldDef::new(FieldTy::Int)
    }

    pub fn float() -> FieldDef {
        FieldDef::new(FieldTy::Float)
    }

    pub fn bool() -> FieldDef {
        FieldDef::new(FieldTy::Bool)
    }

    pub fn str() -> FieldDef {
        FieldDef::new(FieldTy::Str)
    }

    pub fn datetime() -> FieldDef {
        FieldDef::new(FieldTy::DateTime)
    }

    pub fn nullable(mut self) -> FieldDef {
        self.nullable = true;
        self
    }

    /// Literal stored when an insert omits the field.
    pub fn default(mut self, value: impl Into<Value>) -> FieldDef {
        self.default = DefaultPolicy::Value(value.into());
        self
    }

    /// Leave the value to the database, e.g. an auto-incrementing key.
    pub fn server_default(mut self) -> FieldDef {
        self.default = DefaultPolicy::Server;
        self
    }

    /// Stamp the current time when an insert omits the field.
    pub fn default_now(mut self) -> FieldDef {
        self.default = DefaultPolicy::Now;
        self
    }

    pub fn size(mut self, size: u32) -> FieldDef {
        self.size = Some(size);
        self
    }

    /// Marks the field as a foreign key to `field`.
    pub fn foreign(mut self, field: FieldId) -> FieldDef {
        self.foreign = Some(field);
        self
    }
}

impl RefDef {
    pub fn new(field: FieldId, target: TableId) -> RefDef {
        RefDef {
            field,
            target,
            backref: None,
        }
    }

    /// Also create a collection named `name` on the target table.
    pub fn backref(mut self, name: impl Into<String>) -> RefDef {
        self.backref = Some(name.into());
        self
    }
}

impl From<FieldId> for Attr {
    fn from(value: FieldId) -> Self {
        Attr::Field(value)
    }
}

impl From<ReferenceId> for Attr {
    fn from(value: ReferenceId) -> Self {
        Attr::Reference(value)
    }
}

impl Builder {
    /// Creates an unbound field.
    pub fn field(&mut self, def: FieldDef) -> FieldId {
        let id = FieldId(self.fields.len());
        self.fields.push(FieldSlot { def, binding: None });
        id
    }

    /// Creates an unbound reference.
    pub fn reference(&mut self, def: RefDef) -> ReferenceId {
        let id = ReferenceId(self.references.len());
        self.references.push(RefSlot {
            def,
            binding: None,
            backref: None,
        });
        id
    }

    /// Starts declaring a table. The SQL name defaults to the snake-cased
    /// type name.
    pub fn table(&mut self, type_name: impl Into<String>) -> TableBuilder<'_> {
        TableBuilder {
            builder: self,
            type_name: type_name.into(),
            name: None,
            base: None,
            primary: None,
            attrs: vec![],
        }
    }

    /// Assigns a deferred attribute of an already declared table.
    ///
    /// The assignment is bound and validated when [`Builder::build`] runs.
    pub fn assign(&mut self, table: TableId, name: &str, attr: impl Into<Attr>) -> Result<()> {
        let decl = self.decl(table)?;

        match decl.attrs.get(name) {
            Some(Slot::Deferred) => {}
            Some(_) => {
                return Err(Error::invalid_schema(format!(
                    "`{}.{}` is not a deferred attribute",
                    decl.type_name, name
                )))
            }
            None => return Err(Error::field_not_found(&decl.type_name, name)),
        }

        if self
            .late
            .iter()
            .any(|late| late.table == table && late.name == name)
        {
            return Err(Error::invalid_schema(format!(
                "deferred attribute `{}.{}` can't be assigned twice",
                decl.type_name, name
            )));
        }

        self.late.push(LateAttr {
            table,
            name: name.to_string(),
            attr: attr.into(),
        });

        Ok(())
    }

    /// Resolves deferred attributes and produces the immutable schema.
    pub fn build(mut self) -> Result<Schema> {
        self.resolve_late()?;

        for decl in &self.tables {
            for (name, slot) in &decl.attrs {
                if matches!(slot, Slot::Deferred) {
                    return Err(Error::invalid_schema(format!(
                        "deferred attribute `{}.{}` was never assigned",
                        decl.type_name, name
                    )));
                }
            }
        }

        if let Some(index) = self.fields.iter().position(|slot| slot.binding.is_none()) {
            return Err(Error::invalid_schema(format!(
                "{:?} is not assigned to any table",
                FieldId(index)
            )));
        }

        if let Some(index) = self.references.iter().position(|slot| slot.binding.is_none()) {
            return Err(Error::invalid_schema(format!(
                "{:?} is not assigned to any table",
                ReferenceId(index)
            )));
        }

        self.assemble()
    }

    fn resolve_late(&mut self) -> Result<()> {
        let late = std::mem::take(&mut self.late);

        // Fields first, so late references can validate against them.
        let (fields, references): (Vec<_>, Vec<_>) = late
            .into_iter()
            .partition(|late| matches!(late.attr, Attr::Field(_)));

        for late in fields.into_iter().chain(references) {
            let type_name = self.decl(late.table)?.type_name.clone();

            let slot = match late.attr {
                Attr::Field(id) => {
                    self.bind_field(late.table, &type_name, &late.name, id)?;
                    Slot::Field(id)
                }
                Attr::Reference(id) => {
                    self.bind_reference(late.table, &type_name, &late.name, id)?;
                    Slot::Reference(id)
                }
            };

            self.tables[late.table.0].attrs.insert(late.name.clone(), slot);

            tracing::debug!(
                table = %type_name,
                attribute = %late.name,
                "resolved deferred attribute"
            );
        }

        Ok(())
    }

    fn assemble(self) -> Result<Schema> {
        let mut fields: Vec<Option<Field>> = vec![None; self.fields.len()];
        let mut references: Vec<Option<Reference>> = vec![None; self.references.len()];
        let mut tables = Vec::with_capacity(self.tables.len());

        for (index, decl) in self.tables.into_iter().enumerate() {
            let id = TableId(index);
            let mut table = Table {
                id,
                type_name: decl.type_name,
                name: decl.name,
                fields: vec![],
                references: vec![],
                collections: vec![],
                primary_key: decl.primary_key,
            };

            for (name, slot) in decl.attrs {
                match slot {
                    Slot::Field(field_id) => {
                        let def = &self.fields[field_id.0].def;
                        fields[field_id.0] = Some(Field {
                            id: field_id,
                            owner: id,
                            index: table.fields.len(),
                            name,
                            ty: def.ty,
                            nullable: def.nullable,
                            default: def.default.clone(),
                            size: def.size,
                            foreign: def.foreign,
                        });
                        table.fields.push(field_id);
                    }
                    Slot::Reference(reference_id) => {
                        let slot = &self.references[reference_id.0];
                        references[reference_id.0] = Some(Reference {
                            id: reference_id,
                            owner: id,
                            index: table.references.len(),
                            name,
                            field: slot.def.field,
                            target: slot.def.target,
                            nullable: self.fields[slot.def.field.0].def.nullable,
                            backref: slot.backref,
                        });
                        table.references.push(reference_id);
                    }
                    Slot::Collection(collection_id) => table.collections.push(collection_id),
                    Slot::Deferred => {}
                }
            }

            tables.push(table);
        }

        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| {
                field.ok_or_else(|| {
                    Error::invalid_schema(format!("{:?} is not declared on a table", FieldId(index)))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let references = references
            .into_iter()
            .enumerate()
            .map(|(index, reference)| {
                reference.ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "{:?} is not declared on a table",
                        ReferenceId(index)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Schema {
            tables,
            fields,
            references,
            collections: self.collections,
        })
    }

    fn decl(&self, table: TableId) -> Result<&TableDecl> {
        self.tables
            .get(table.0)
            .ok_or_else(|| Error::invalid_schema(format!("{table:?} is not declared")))
    }

    fn type_name(&self, table: TableId) -> String {
        self.tables
            .get(table.0)
            .map(|decl| decl.type_name.clone())
            .unwrap_or_else(|| format!("{table:?}"))
    }

    fn bind_field(&mut self, table: TableId, type_name: &str, name: &str, id: FieldId) -> Result<()> {
        let slot = self
            .fields
            .get_mut(id.0)
            .ok_or_else(|| Error::invalid_schema(format!("{id:?} does not exist")))?;

        if let Some(prev) = &slot.binding {
            return Err(Error::invalid_schema(format!(
                "Field can't be assigned twice; `{}.{}` is already bound as `{}.{}`",
                type_name, name, prev.type_name, prev.name
            )));
        }

        slot.binding = Some(Binding {
            table,
            type_name: type_name.to_string(),
            name: name.to_string(),
        });

        Ok(())
    }

    fn bind_reference(
        &mut self,
        table: TableId,
        type_name: &str,
        name: &str,
        id: ReferenceId,
    ) -> Result<()> {
        let slot = self
            .references
            .get(id.0)
            .ok_or_else(|| Error::invalid_schema(format!("{id:?} does not exist")))?;

        if let Some(prev) = &slot.binding {
            return Err(Error::invalid_schema(format!(
                "Reference can't be assigned twice; `{}.{}` is already bound as `{}.{}`",
                type_name, name, prev.type_name, prev.name
            )));
        }

        let def = slot.def.clone();
        let field = self
            .fields
            .get(def.field.0)
            .ok_or_else(|| Error::invalid_schema(format!("{:?} does not exist", def.field)))?;

        let Some(field_binding) = &field.binding else {
            return Err(Error::invalid_schema(format!(
                "reference `{type_name}.{name}` uses a field that is not assigned to a table"
            )));
        };

        if field_binding.table != table {
            return Err(Error::invalid_schema(format!(
                "reference field `{}.{}` on foreign table `{}`",
                field_binding.type_name, field_binding.name, type_name
            )));
        }

        let Some(foreign) = field.def.foreign else {
            return Err(Error::invalid_schema(format!(
                "reference field `{}.{}` not foreign",
                field_binding.type_name, field_binding.name
            )));
        };

        let Some(foreign_binding) = self
            .fields
            .get(foreign.0)
            .and_then(|slot| slot.binding.as_ref())
        else {
            return Err(Error::invalid_schema(format!(
                "reference field `{}.{}` points at a field not assigned to a table",
                field_binding.type_name, field_binding.name
            )));
        };

        if foreign_binding.table != def.target {
            return Err(Error::invalid_schema(format!(
                "reference table `{}` doesn't match field's related table `{}`",
                self.type_name(def.target),
                foreign_binding.type_name
            )));
        }

        let backref = match def.backref {
            Some(backref) => Some(self.add_collection(def.target, backref, id)?),
            None => None,
        };

        let slot = &mut self.references[id.0];
        slot.backref = backref;
        slot.binding = Some(Binding {
            table,
            type_name: type_name.to_string(),
            name: name.to_string(),
        });

        Ok(())
    }

    fn add_collection(
        &mut self,
        owner: TableId,
        name: String,
        reference: ReferenceId,
    ) -> Result<CollectionId> {
        let id = CollectionId(self.collections.len());

        let decl = self
            .tables
            .get_mut(owner.0)
            .ok_or_else(|| Error::invalid_schema(format!("{owner:?} is not declared")))?;

        if decl.attrs.contains_key(&name) {
            return Err(Error::invalid_schema(format!(
                "duplicate attribute `{}.{}`",
                decl.type_name, name
            )));
        }

        decl.attrs.insert(name.clone(), Slot::Collection(id));
        self.collections.push(Collection {
            id,
            owner,
            name,
            reference,
        });

        Ok(id)
    }
}

impl TableBuilder<'_> {
    /// Assigns a field or reference to the attribute `name`.
    pub fn attr(mut self, name: impl Into<String>, attr: impl Into<Attr>) -> Self {
        self.attrs.push((name.into(), Some(attr.into())));
        self
    }

    /// Declares an attribute that is assigned later with [`Builder::assign`].
    pub fn deferred(mut self, name: impl Into<String>) -> Self {
        self.attrs.push((name.into(), None));
        self
    }

    /// Names the primary key field.
    pub fn primary(mut self, name: impl Into<String>) -> Self {
        self.primary = Some(name.into());
        self
    }

    /// Overrides the SQL table name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Inherits the fields (and primary key) of `base`.
    pub fn extends(mut self, base: TableId) -> Self {
        self.base = Some(base);
        self
    }

    /// Closes the table, binding its attributes.
    pub fn build(self) -> Result<TableId> {
        let TableBuilder {
            builder,
            type_name,
            name,
            base,
            mut primary,
            attrs,
        } = self;

        let id = TableId(builder.tables.len());
        let name = name.unwrap_or_else(|| name::table_name(&type_name));
        let mut slots: IndexMap<String, Slot> = IndexMap::new();

        if let Some(base) = base {
            let base_decl = builder.decl(base)?;
            let mut inherited = vec![];

            for (attr_name, slot) in &base_decl.attrs {
                match slot {
                    Slot::Field(field_id) => {
                        if attrs.iter().all(|(own, _)| own != attr_name) {
                            inherited.push((attr_name.clone(), builder.fields[field_id.0].def.clone()));
                        }
                    }
                    Slot::Deferred => {
                        return Err(Error::invalid_schema(format!(
                            "`{}` extends `{}` before `{}.{}` is assigned",
                            type_name, base_decl.type_name, base_decl.type_name, attr_name
                        )))
                    }
                    _ => {}
                }
            }

            if primary.is_none() {
                primary = base_decl.primary_key.and_then(|key| {
                    builder.fields[key.0]
                        .binding
                        .as_ref()
                        .map(|binding| binding.name.clone())
                });
            }

            for (attr_name, def) in inherited {
                let field_id = builder.field(def);
                builder.bind_field(id, &type_name, &attr_name, field_id)?;
                slots.insert(attr_name, Slot::Field(field_id));
            }
        }

        let mut references = vec![];

        for (attr_name, attr) in &attrs {
            // Inherited fields overridden here were never copied
            if slots.contains_key(attr_name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate attribute `{type_name}.{attr_name}`"
                )));
            }

            let slot = match attr {
                Some(Attr::Field(field_id)) => {
                    builder.bind_field(id, &type_name, attr_name, *field_id)?;
                    Slot::Field(*field_id)
                }
                Some(Attr::Reference(reference_id)) => {
                    references.push((attr_name.clone(), *reference_id));
                    // Placeholder until the reference is bound below
                    Slot::Deferred
                }
                None => Slot::Deferred,
            };

            slots.insert(attr_name.clone(), slot);
        }

        let primary_key = match primary {
            Some(primary) => match slots.get(&primary) {
                Some(Slot::Field(field_id)) => Some(*field_id),
                _ => return Err(Error::field_not_found(&type_name, primary)),
            },
            None => None,
        };

        tracing::debug!(
            table = %type_name,
            name = %name,
            attributes = slots.len(),
            "declared table"
        );

        builder.tables.push(TableDecl {
            type_name: type_name.clone(),
            name,
            attrs: slots,
            primary_key,
        });

        for (attr_name, reference_id) in references {
            builder.bind_reference(id, &type_name, &attr_name, reference_id)?;
            builder.tables[id.0]
                .attrs
                .insert(attr_name, Slot::Reference(reference_id));
        }

        Ok(id)
    }
}
