//! Column sets and table configurations for each dashboard entity.

use crate::entities::{Person, Role, User};
use crate::table::{
    Cell, CellValue, ColumnDef, FilterFn, Header, STATUS_COLUMN, StatusOption, TableConfiguration,
};

fn select_column<R>(id_value: fn(&R) -> CellValue) -> ColumnDef<R> {
    ColumnDef::new("id", Header::SelectAll, id_value, |_| Cell::SelectRow)
        .size(50.0)
        .sortable(false)
        .global_filter(false)
        .hideable(false)
}

pub fn person_columns() -> Vec<ColumnDef<Person>> {
    vec![
        select_column(|p: &Person| CellValue::text(p.id.as_str())),
        ColumnDef::new(
            "name",
            Header::Text("Customer"),
            |p: &Person| CellValue::text(p.name.as_str()),
            |p: &Person| Cell::Avatar {
                name: p.name.clone(),
                description: Some(p.email.to_lowercase()),
                src: Some(p.avatar.clone()),
            },
        )
        .size(280.0),
        ColumnDef::new(
            "dueDate",
            Header::Text("Due Date"),
            |p: &Person| CellValue::Date(p.due_date),
            |p: &Person| Cell::Date(p.due_date),
        )
        .size(180.0),
        ColumnDef::new(
            "amount",
            Header::Text("Amount"),
            |p: &Person| CellValue::Number(p.amount),
            |p: &Person| Cell::Amount(p.amount),
        )
        .size(120.0),
        ColumnDef::new(
            STATUS_COLUMN,
            Header::Text("Status"),
            |p: &Person| CellValue::text(p.status.as_str()),
            |p: &Person| Cell::Status(p.status.clone()),
        )
        .size(120.0)
        .filter(FilterFn::EqualsString),
        ColumnDef::new(
            "avatar",
            Header::Text(""),
            |_: &Person| CellValue::Empty,
            |_: &Person| Cell::Action,
        )
        .size(120.0)
        .sortable(false)
        .global_filter(false),
    ]
}

pub fn person_table_config() -> TableConfiguration {
    TableConfiguration::builder()
        .enable_selection(true)
        .enable_pagination(true)
        .enable_column_visibility(true)
        .enable_global_filter(true)
        .enable_column_filters(true)
        .status_options(vec![
            StatusOption::new("Paid", "paid"),
            StatusOption::new("Pending", "pending"),
            StatusOption::new("Overdue", "overdue"),
        ])
        .default_page_size(10)
        .build()
}

pub fn user_columns() -> Vec<ColumnDef<User>> {
    vec![
        ColumnDef::new(
            "firstName",
            Header::Text("full name"),
            |u: &User| CellValue::text(u.first_name.as_str()),
            |u: &User| Cell::Avatar {
                name: u.first_name.clone(),
                description: Some(u.email.to_lowercase()),
                src: u.image.clone(),
            },
        )
        .size(200.0),
        ColumnDef::new(
            "age",
            Header::Text("Age"),
            |u: &User| CellValue::Number(f64::from(u.age)),
            |u: &User| Cell::Text(u.age.to_string()),
        )
        .size(80.0),
        ColumnDef::new(
            "gender",
            Header::Text("Gender"),
            |u: &User| CellValue::text(u.gender.as_str()),
            |u: &User| Cell::Text(u.gender.clone()),
        )
        .size(80.0),
        ColumnDef::new(
            STATUS_COLUMN,
            Header::Text("Status"),
            |u: &User| CellValue::text(u.status_or_default()),
            |u: &User| Cell::Status(u.status_or_default().to_owned()),
        )
        .size(120.0)
        .filter(FilterFn::EqualsString),
    ]
}

pub fn user_table_config() -> TableConfiguration {
    TableConfiguration::builder()
        .enable_selection(true)
        .enable_pagination(true)
        .enable_column_visibility(true)
        .enable_global_filter(true)
        .enable_column_filters(true)
        .status_options(vec![
            StatusOption::new("Active", "active"),
            StatusOption::new("Inactive", "inactive"),
        ])
        .default_page_size(10)
        .build()
}

pub fn role_columns() -> Vec<ColumnDef<Role>> {
    vec![
        ColumnDef::new(
            "name",
            Header::Text("Role Name"),
            |r: &Role| CellValue::text(r.name.as_str()),
            |r: &Role| Cell::Text(r.name.clone()),
        )
        .size(200.0),
        ColumnDef::new(
            "permissions",
            Header::Text("Permissions"),
            |r: &Role| CellValue::Text(r.permissions.join(", ")),
            |r: &Role| Cell::Text(r.permissions.join(", ")),
        )
        .size(300.0),
        ColumnDef::new(
            "createdAt",
            Header::Text("Created At"),
            |r: &Role| CellValue::Date(r.created_at),
            |r: &Role| Cell::Date(r.created_at),
        )
        .size(200.0),
        ColumnDef::new(
            "updatedAt",
            Header::Text("Updated At"),
            |r: &Role| CellValue::Date(r.updated_at),
            |r: &Role| Cell::Date(r.updated_at),
        )
        .size(200.0),
    ]
}

pub fn role_table_config() -> TableConfiguration {
    TableConfiguration::builder()
        .enable_pagination(true)
        .enable_column_visibility(true)
        .enable_global_filter(true)
        .default_page_size(10)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sample_persons;
    use crate::format::parse_date;
    use crate::table::DataTable;

    fn user(id: u64, first: &str, status: Option<&str>) -> User {
        User {
            id,
            first_name: first.to_owned(),
            last_name: "Doe".to_owned(),
            maiden_name: None,
            age: 30,
            gender: "female".to_owned(),
            email: format!("{}@Example.com", first.to_lowercase()),
            phone: None,
            username: None,
            image: None,
            status: status.map(str::to_owned),
        }
    }

    #[test]
    fn user_status_defaults_to_active_for_filtering() {
        let mut table = DataTable::new(user_columns(), user_table_config());
        let users = vec![
            user(1, "Emily", None),
            user(2, "Michael", Some("inactive")),
        ];
        table.set_column_filter(STATUS_COLUMN, "active");
        let model = table.row_model(&users);
        assert_eq!(model.filtered_count, 1);
        assert_eq!(model.rows[0].first_name, "Emily");
    }

    #[test]
    fn user_avatar_uses_lowercased_email() {
        let columns = user_columns();
        let cell = columns[0].render(&user(1, "Emily", None));
        match cell {
            Cell::Avatar {
                name, description, ..
            } => {
                assert_eq!(name, "Emily");
                assert_eq!(description.as_deref(), Some("emily@example.com"));
            }
            other => panic!("expected avatar cell, got {other:?}"),
        }
    }

    #[test]
    fn person_table_toggles_only_titled_columns() {
        let table = DataTable::new(person_columns(), person_table_config());
        let labels: Vec<_> = table.toggleable_columns().map(|(_, label)| label).collect();
        assert_eq!(labels, ["Customer", "Due Date", "Amount", "Status"]);
        assert!(table.has_status_filter());
    }

    #[test]
    fn person_total_width_matches_column_sizes() {
        let table = DataTable::new(person_columns(), person_table_config());
        let persons = sample_persons();
        assert_eq!(table.row_model(&persons).total_width, 870.0);
    }

    #[test]
    fn person_status_filter_and_sort_by_due_date() {
        let mut table = DataTable::new(person_columns(), person_table_config());
        let persons = sample_persons();
        table.set_column_filter(STATUS_COLUMN, "pending");
        table.toggle_sort("dueDate");
        let names: Vec<_> = table
            .row_model(&persons)
            .rows
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Lucia Kshlerin", "Francis Sanford MD", "Byron Hoppe III"]
        );
    }

    #[test]
    fn role_table_has_no_selection_or_status_filter() {
        let config = role_table_config();
        assert!(!config.enable_selection);
        assert!(!config.enable_column_filters);
        assert!(config.shows_toolbar());

        let created = parse_date("2024-01-01T00:00:00Z").expect("valid date");
        let role = Role {
            id: "r1".to_owned(),
            name: "Admin".to_owned(),
            permissions: vec!["read".to_owned(), "write".to_owned()],
            created_at: created,
            updated_at: created,
        };
        let columns = role_columns();
        assert_eq!(columns[1].render(&role), Cell::Text("read, write".to_owned()));
        assert!(!DataTable::new(columns, config).has_status_filter());
    }
}
