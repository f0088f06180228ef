/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (Access gate), upload (file validation), http / cors (横断的なもの)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod upload;
