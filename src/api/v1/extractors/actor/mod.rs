/*!
 * Actor extractors
 *
 * Responsibility:
 * - access middleware が extensions に入れた Actor を handler に渡す
 * - Actor の型そのものは services::auth::actor にある
 *
 * Public API:
 * - CurrentActor (Actor 必須)
 * - MaybeActor (匿名アクセスを許すルート用)
 */

mod core;

pub use core::{CurrentActor, MaybeActor};
