use scholar_db::note::{NewNote as NewNoteData, NotePatch};
use scholar_entity::note::Model as NoteModel;
use scholar_model::note::{NewNote, Note, NoteUpdate};

use crate::convert::{FromDbModel, FromModel};

impl FromDbModel<NoteModel> for Note {
    fn from_db_model(model: NoteModel) -> Self {
        Self {
            id: model.id,
            subject: model.subject_id,
            title: model.title,
            content: model.content,
        }
    }
}

impl FromModel<NewNote> for NewNoteData {
    fn from_model(model: NewNote) -> Self {
        Self {
            title: model.title,
            content: model.content,
        }
    }
}

impl FromModel<NoteUpdate> for NotePatch {
    fn from_model(model: NoteUpdate) -> Self {
        Self {
            subject_id: model.subject,
            title: model.title,
            content: model.content,
        }
    }
}
