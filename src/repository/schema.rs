// Tables owned by the database; rows are only written through stored procedures.

diesel::table! {
    projects (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    todos (id) {
        id -> Int4,
        project_id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        priority -> Varchar,
        due_date -> Date,
        is_completed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    todos,
);
