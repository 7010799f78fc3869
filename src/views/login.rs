use super::copy_button;
use crate::views::resources::OPERATIONS_EMAIL;

pub fn login_page() -> String {
    format!(
        r#"<section class="card narrow login">
  <h1>Sign in to your account</h1>
  <form method="post" action="/login" class="stack" data-pending-form>
    <label for="email">Email address</label>
    <input id="email" name="email" type="email" autocomplete="email" required>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" autocomplete="current-password" required>
    <button type="submit" class="button wide" data-pending-text="Signing in...">Sign In</button>
  </form>
  <p class="muted center">For login information, please contact {contact}</p>
</section>"#,
        contact = copy_button(OPERATIONS_EMAIL, "email address"),
    )
}
