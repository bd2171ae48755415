use scholar_entity::user::{Model as UserModel, Role as RoleModel};
use scholar_model::user::{Role, UserProfile};

use crate::convert::{FromDbModel, FromModel};

impl FromDbModel<RoleModel> for Role {
    fn from_db_model(model: RoleModel) -> Self {
        match model {
            RoleModel::Student => Role::Student,
            RoleModel::Teacher => Role::Teacher,
        }
    }
}

impl FromModel<Role> for RoleModel {
    fn from_model(model: Role) -> Self {
        match model {
            Role::Student => RoleModel::Student,
            Role::Teacher => RoleModel::Teacher,
        }
    }
}

impl FromDbModel<UserModel> for UserProfile {
    fn from_db_model(model: UserModel) -> Self {
        Self {
            uid: model.id,
            email: model.email,
            name: model.name,
            photo_url: model.photo_url,
            role: FromDbModel::from_db_model(model.role),
        }
    }
}
