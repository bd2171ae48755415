use scholar_db::quiz::question::NewQuestion;
use scholar_db::quiz::quiz::NewQuiz;
use scholar_db::{subject, user};
use scholar_entity::subject::Model as SubjectModel;
use scholar_entity::user::{Model as UserModel, Role};
use sea_orm::DatabaseConnection;

#[allow(dead_code)]
pub async fn create_test_subject(db: &DatabaseConnection, name: &str) -> SubjectModel {
    subject::Mutation::create_subject(db, name.to_owned(), format!("All about {name}"), None)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_user(db: &DatabaseConnection, id: &str, role: Role) -> UserModel {
    user::Mutation::create_user(db, id, Some(format!("{id}@example.org")), Some(id.to_owned()), role)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub fn test_quiz(title: &str, questions: usize) -> NewQuiz {
    NewQuiz {
        title: title.to_owned(),
        questions: (0..questions)
            .map(|i| NewQuestion {
                text: format!("What is {i} + 1?"),
                options: vec![i.to_string(), (i + 1).to_string(), (i + 2).to_string(), (i + 3).to_string()],
                correct_answer: 1,
            })
            .collect(),
    }
}
