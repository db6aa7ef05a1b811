//! GraphQL documents sent to the reservation backend

const RESERVATION_FIELDS: &str = "
    id
    createdAt
    updatedAt
    contactId
    tableId
    date
    numberOfPeople
    status
    contact {
      name
      phone
    }
    table {
      seats
    }
";

const LIST_ARGS: &str = "
    page: $page
    limit: $limit
    keyword: $keyword
    date: $date
    status: $status
    seats: $seats
";

const TABLE_FIELDS: &str = "
    id
    seats
  ";

const LIST_PARAMS: &str =
    "$page: Int, $limit: Int, $keyword: String, $date: String, $status: Int, $seats: Int";

/// Operation name paired with the response field it fills
#[derive(Debug, Clone)]
pub struct Document {
    pub field: &'static str,
    pub query: String,
}

/// `head { call { selection } }`
fn render(head: &str, call: &str, selection: &str) -> String {
    format!("{head} {{\n  {call} {{{selection}}}\n}}")
}

/// Every reservation, for staff
pub fn reservations() -> Document {
    list_document("Reservations", "reservations")
}

/// The caller's own reservations
pub fn reservations_by_current_user() -> Document {
    list_document("ReservationsByCurrentUser", "reservationsByCurrentUser")
}

fn list_document(operation: &str, field: &'static str) -> Document {
    Document {
        field,
        query: render(
            &format!("query {operation}({LIST_PARAMS})"),
            &format!("{field}({LIST_ARGS})"),
            RESERVATION_FIELDS,
        ),
    }
}

pub fn reservation_info() -> Document {
    Document {
        field: "reservationInfo",
        query: render(
            "query ReservationInfo($id: String!)",
            "reservationInfo(id: $id)",
            RESERVATION_FIELDS,
        ),
    }
}

pub fn update_reservation_info() -> Document {
    Document {
        field: "updateReservationInfo",
        query: render(
            "mutation UpdateReservationInfo($data: UpdateReservationInfoInput!)",
            "updateReservationInfo(data: $data)",
            RESERVATION_FIELDS,
        ),
    }
}

pub fn add_reservation_info() -> Document {
    Document {
        field: "addReservationInfo",
        query: render(
            "mutation AddReservationInfo($data: AddReservationInfoInput!)",
            "addReservationInfo(data: $data)",
            RESERVATION_FIELDS,
        ),
    }
}

pub fn tables() -> Document {
    Document {
        field: "tables",
        query: render("query Tables", "tables", TABLE_FIELDS),
    }
}

pub fn add_table_info() -> Document {
    Document {
        field: "addTableInfo",
        query: render(
            "mutation AddTableInfo($data: TableInfoInput!)",
            "addTableInfo(data: $data)",
            TABLE_FIELDS,
        ),
    }
}

pub fn update_table_info() -> Document {
    Document {
        field: "updateTableInfo",
        query: render(
            "mutation UpdateTableInfo($id: String!, $data: TableInfoInput!)",
            "updateTableInfo(id: $id, data: $data)",
            TABLE_FIELDS,
        ),
    }
}
