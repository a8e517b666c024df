use axum::response::Html;

const INDEX: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Accounts</title></head>
<body>
  <h1>Accounts</h1>
  <ul>
    <li><a href="/register">Register</a></li>
    <li><a href="/login">Log in</a></li>
  </ul>
</body>
</html>
"#;

const REGISTER: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Register</title></head>
<body>
  <h1>Register</h1>
  <form action="/register" method="post" enctype="multipart/form-data">
    <label>Email <input type="email" name="email" required></label><br>
    <label>Username <input type="text" name="username" required></label><br>
    <label>Password <input type="password" name="password" required></label><br>
    <label>Country code <input type="text" name="codigo_de_pais"></label><br>
    <label>Names <input type="text" name="nombres"></label><br>
    <label>Surnames <input type="text" name="apellidos"></label><br>
    <label>Phone <input type="tel" name="telefono"></label><br>
    <label>Age <input type="number" name="edad"></label><br>
    <label>Profession <input type="text" name="profesion"></label><br>
    <label>Profile image <input type="file" name="imagen_perfil" accept=".jpg,.jpeg" required></label><br>
    <button type="submit">Register</button>
  </form>
</body>
</html>
"#;

const LOGIN: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Log in</title></head>
<body>
  <h1>Log in</h1>
  <form action="/login" method="post">
    <label>Username or email <input type="text" name="username_or_email" required></label><br>
    <label>Password <input type="password" name="password" required></label><br>
    <button type="submit">Log in</button>
  </form>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX)
}

pub async fn register_page() -> Html<&'static str> {
    Html(REGISTER)
}

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN)
}
