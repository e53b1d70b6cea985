use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::director::Entity")]
    Directors,
}

impl Related<super::director::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Directors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
