//! Book shelf endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::book::{Book, BookPayload, BookQuery, BookShort},
};

use super::envelope::ApiResponse;

/// Data of a successful create
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: String,
}

/// Data of a book listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookShort>,
}

/// Data of a single book lookup
#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added, data holds its id", body = CreatedBook),
        (status = 400, description = "Missing name, non-whole number or readPage over pageCount", body = ErrorResponse),
        (status = 500, description = "Book could not be stored", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(data), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedBook>>)> {
    let book_id = state.services.books.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreatedBook { book_id }).with_message("Book added successfully")),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books as {id, name, publisher}", body = BookList),
        (status = 400, description = "Unknown parameter, empty name or non-integer flag", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BookQuery>, AppError>,
) -> AppResult<Json<ApiResponse<BookList>>> {
    let books = state.services.books.list(&query).await?;
    Ok(Json(ApiResponse::data(BookList { books })))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(book_id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = state.services.books.get_by_id(&book_id).await?;
    Ok(Json(ApiResponse::data(BookDetail { book })))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Missing name, non-whole number or readPage over pageCount", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(book_id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Json(data), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.update(&book_id, &data).await?;
    Ok(Json(ApiResponse::message("Book updated successfully")))
}

/// Remove a book from the shelf
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(book_id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete(&book_id).await?;
    Ok(Json(ApiResponse::message("Book deleted successfully")))
}
