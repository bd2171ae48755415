use scholar_db::subject::SubjectChanges;
use scholar_entity::subject::Model as SubjectModel;
use scholar_model::subject::{Subject, SubjectUpdate};

use crate::convert::{FromDbModel, FromModel, non_negative};

impl FromDbModel<SubjectModel> for Subject {
    fn from_db_model(model: SubjectModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image: model.image,
            note_count: non_negative(model.note_count),
            quiz_count: non_negative(model.quiz_count),
        }
    }
}

impl FromModel<SubjectUpdate> for SubjectChanges {
    fn from_model(model: SubjectUpdate) -> Self {
        Self {
            name: model.name,
            description: model.description,
            image: model.image,
        }
    }
}
