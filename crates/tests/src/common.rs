use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use client::{ApiClient, SessionHolder};
use serde_json::{json, Value};
use shared_types::{ApiConfig, AppError, Credentials, CrudView, FollowUp, Mutation, Resource};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Password of every seeded account.
pub const PASSWORD: &str = "secret123";

pub const ADMIN: &str = "admin@hospital.org";
pub const PHYSICIAN: &str = "k.haddad@hospital.org";
pub const SECRETARY: &str = "s.idrissi@hospital.org";
pub const TECHNICIAN: &str = "y.amrani@hospital.org";
pub const NURSE: &str = "l.mansouri@hospital.org";
/// Account whose role has no dashboard.
pub const INTERN: &str = "o.tazi@hospital.org";

/// One request as the backend saw it, path relative to `/api/`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

struct Account {
    email: String,
    password: String,
    user_id: i64,
}

struct Backend {
    collections: HashMap<String, Vec<Value>>,
    accounts: Vec<Account>,
    tokens: HashMap<String, i64>,
    issued: u64,
    next_id: i64,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<Backend>>;
type Rejection = (StatusCode, Json<Value>);
type Reply = Result<Json<Value>, Rejection>;

fn reject(status: StatusCode, message: &str) -> Rejection {
    (status, Json(json!({ "message": message })))
}

fn lock(state: &Shared) -> MutexGuard<'_, Backend> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Backend {
    fn seeded() -> Self {
        let users = vec![
            json!({"id": 1, "name": "Amina Benali", "email": ADMIN, "role": "administratif", "specialite": null}),
            json!({"id": 2, "name": "Karim Haddad", "email": PHYSICIAN, "role": "medcin", "specialite": "Cardiologie"}),
            json!({"id": 3, "name": "Sara Idrissi", "email": SECRETARY, "role": "secretaire", "specialite": null}),
            json!({"id": 4, "name": "Youssef Amrani", "email": TECHNICIAN, "role": "technicien", "specialite": null}),
            json!({"id": 5, "name": "Leila Mansouri", "email": NURSE, "role": "infirmier", "specialite": "Urgences"}),
            json!({"id": 6, "name": "Omar Tazi", "email": INTERN, "role": "stagiaire", "specialite": null}),
        ];
        let accounts = users
            .iter()
            .map(|u| Account {
                email: u["email"].as_str().unwrap_or_default().to_string(),
                password: PASSWORD.to_string(),
                user_id: u["id"].as_i64().unwrap_or_default(),
            })
            .collect();

        let mut collections = HashMap::new();
        collections.insert("users".to_string(), users);
        collections.insert(
            "patients".to_string(),
            vec![
                json!({"id": 1, "nom": "Alaoui", "prenom": "Nadia", "date_naissance": "1985-03-12",
                       "telephone": "0611223344", "email": "nadia.alaoui@mail.com", "adresse": "12 rue des Roses",
                       "antecedents_medicaux": "Asthme", "hospitalise": true}),
                json!({"id": 2, "nom": "Bennani", "prenom": "Omar", "date_naissance": "1990-07-01",
                       "telephone": "0622334455", "email": null, "adresse": "4 avenue Hassan II",
                       "antecedents_medicaux": null, "hospitalise": false}),
                json!({"id": 3, "nom": "Chraibi", "prenom": "Salma", "date_naissance": null,
                       "telephone": "0633445566", "email": "salma.c@mail.com", "adresse": "",
                       "antecedents_medicaux": "", "hospitalise": 0}),
            ],
        );
        collections.insert(
            "rendezvous".to_string(),
            vec![
                json!({"id": 1, "patient_id": 1, "date_heure": "2024-06-03 09:30:00", "motif": "Contrôle", "statut": "prévu"}),
                json!({"id": 2, "patient_id": 2, "date_heure": "2024-06-01 14:00:00", "motif": "Consultation", "statut": null}),
            ],
        );
        collections.insert(
            "conges".to_string(),
            vec![
                json!({"id": 1, "user_id": 3, "date_debut": "2024-07-01", "date_fin": "2024-07-05",
                       "type": "annuel", "motif": "Vacances", "statut": "en attente"}),
                json!({"id": 2, "user_id": 5, "date_debut": "2024-08-10", "date_fin": "2024-08-12",
                       "type": "maladie", "motif": null, "statut": "accepté"}),
            ],
        );
        collections.insert(
            "equipments".to_string(),
            vec![
                json!({"id": 1, "name": "Scanner", "type": "Imagerie", "status": "actif",
                       "last_maintenance": "2024-01-15", "serial_number": "SN-100"}),
                json!({"id": 2, "name": "Défibrillateur", "type": "Urgence", "status": "en maintenance",
                       "last_maintenance": null, "serial_number": "SN-200"}),
            ],
        );
        collections.insert(
            "maintenance-requests".to_string(),
            vec![
                json!({"id": 1, "equipment_id": 2, "description": "Remplacer la batterie", "status": "pending"}),
                json!({"id": 2, "equipment_id": 1, "description": "Calibration annuelle", "status": "completed"}),
            ],
        );
        collections.insert(
            "factures".to_string(),
            vec![
                json!({"id": 1, "patient_id": 1, "date_facture": "2024-05-02", "montant": "150.00",
                       "statut": "payé", "details": "Consultation"}),
                json!({"id": 2, "patient_id": 2, "date_facture": "2024-05-20", "montant": 80.5,
                       "statut": "en_attente", "details": null}),
            ],
        );
        collections.insert(
            "ordonnances".to_string(),
            vec![json!({"id": 1, "patient_id": 1, "date": "2024-05-02",
                        "prescriptions": "[{\"nom\":\"Ventoline\",\"dosage\":\"100µg\",\"frequence\":\"2x/jour\",\"duree\":\"7 jours\"}]",
                        "notes": "Crise légère"})],
        );
        collections.insert(
            "observations".to_string(),
            vec![
                json!({"id": 1, "patient_id": 1, "text": "Tension stable", "created_at": "2024-06-01 08:00:00"}),
                json!({"id": 2, "patient_id": 3, "text": "Fièvre légère", "created_at": "2024-06-02 07:30:00"}),
            ],
        );

        Self {
            collections,
            accounts,
            tokens: HashMap::new(),
            issued: 0,
            next_id: 100,
            failing: HashSet::new(),
            delays: HashMap::new(),
            requests: Vec::new(),
        }
    }

    /// Record the request, then apply injected failures and, unless
    /// `headers` is `None`, the bearer token check.
    fn enter(
        &mut self,
        method: &'static str,
        path: String,
        headers: Option<&HeaderMap>,
        body: Option<Value>,
    ) -> Result<i64, Rejection> {
        let key = format!("{method} {path}");
        self.requests.push(Recorded { method, path, body });
        if self.failing.contains(&key) {
            return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable"));
        }
        let Some(headers) = headers else {
            return Ok(0);
        };
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        token
            .and_then(|t| self.tokens.get(t).copied())
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Unauthenticated."))
    }

    fn find(&self, collection: &str, id: i64) -> Option<Value> {
        self.collections
            .get(collection)?
            .iter()
            .find(|r| r["id"] == id)
            .cloned()
    }

    fn find_mut(&mut self, collection: &str, id: i64) -> Option<&mut Value> {
        self.collections
            .get_mut(collection)?
            .iter_mut()
            .find(|r| r["id"] == id)
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email == email && Some(a.user_id) != except)
    }
}

fn email_taken_rejection() -> Rejection {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "The email has already been taken.",
            "errors": { "email": ["The email has already been taken."] }
        })),
    )
}

// ── Handlers ──

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut backend = lock(&state);
    backend.enter("POST", "login".into(), None, Some(body.clone()))?;
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let user_id = backend
        .accounts
        .iter()
        .find(|a| a.email == email && a.password == password)
        .map(|a| a.user_id)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;
    backend.issued += 1;
    let token = format!("token-{user_id}-{}", backend.issued);
    backend.tokens.insert(token.clone(), user_id);
    Ok(Json(json!({ "token": token })))
}

async fn current_user(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut backend = lock(&state);
    let user_id = backend.enter("GET", "user".into(), Some(&headers), None)?;
    backend
        .find("users", user_id)
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))
}

async fn statistics(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut backend = lock(&state);
    backend.enter("GET", "statistiques".into(), Some(&headers), None)?;
    let count = |collection: &str| backend.collections.get(collection).map_or(0, Vec::len);
    let staff = |role: &str| {
        backend
            .collections
            .get("users")
            .map_or(0, |users| users.iter().filter(|u| u["role"] == role).count())
    };
    Ok(Json(json!({
        "totalPatients": count("patients"),
        "totalRendezvous": count("rendezvous"),
        "totalConges": count("conges"),
        "totalEquipments": count("equipments"),
        "totalMedecins": staff("medcin"),
        "totalInfirmiers": staff("infirmier"),
        "totalTechniciens": staff("technicien"),
        "totalSecretaires": staff("secretaire"),
    })))
}

async fn employees(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut backend = lock(&state);
    backend.enter("GET", "users/conge".into(), Some(&headers), None)?;
    let list: Vec<Value> = backend
        .collections
        .get("users")
        .map(|users| {
            users
                .iter()
                .filter(|u| u["role"] != "administratif")
                .map(|u| json!({ "id": u["id"], "name": u["name"], "role": u["role"] }))
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(Value::Array(list)))
}

async fn list(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let delay = lock(&state).delays.get(&format!("GET {collection}")).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let mut backend = lock(&state);
    backend.enter("GET", collection.clone(), Some(&headers), None)?;
    let mut records = backend
        .collections
        .get(&collection)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Unknown collection"))?;
    // Leave requests carry their employee, as the backend eager-loads it.
    if collection == "conges" {
        for record in &mut records {
            let owner = record["user_id"]
                .as_i64()
                .and_then(|id| backend.find("users", id));
            if let (Some(owner), Value::Object(fields)) = (owner, record) {
                fields.insert("user".into(), json!({ "id": owner["id"], "name": owner["name"] }));
            }
        }
    }
    // Patients come back through the paginator, everything else bare.
    if collection == "patients" {
        return Ok(Json(json!({ "data": records, "current_page": 1, "total": records.len() })));
    }
    Ok(Json(Value::Array(records)))
}

async fn create(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = lock(&state);
    backend.enter("POST", collection.clone(), Some(&headers), Some(body.clone()))?;
    if !backend.collections.contains_key(&collection) {
        return Err(reject(StatusCode::NOT_FOUND, "Unknown collection"));
    }

    let id = backend.next_id;
    backend.next_id += 1;
    let mut record = body;
    let Value::Object(fields) = &mut record else {
        return Err(reject(StatusCode::BAD_REQUEST, "Expected an object"));
    };
    fields.insert("id".into(), json!(id));

    if collection == "users" {
        let email = fields
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if backend.email_taken(&email, None) {
            return Err(email_taken_rejection());
        }
        let password = match fields.remove("password") {
            Some(Value::String(p)) => p,
            _ => return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "The password field is required.")),
        };
        backend.accounts.push(Account {
            email,
            password,
            user_id: id,
        });
    }
    if collection == "observations" {
        fields.insert("created_at".into(), json!("2024-06-03 10:00:00"));
    }

    backend
        .collections
        .entry(collection)
        .or_default()
        .push(record.clone());
    Ok(Json(record))
}

async fn update(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = lock(&state);
    backend.enter("PUT", format!("{collection}/{id}"), Some(&headers), Some(body.clone()))?;
    let Value::Object(mut changes) = body else {
        return Err(reject(StatusCode::BAD_REQUEST, "Expected an object"));
    };

    if collection == "users" {
        if let Some(email) = changes.get("email").and_then(Value::as_str) {
            if backend.email_taken(email, Some(id)) {
                return Err(email_taken_rejection());
            }
        }
        let email = changes.get("email").and_then(Value::as_str).map(str::to_string);
        let password = match changes.remove("password") {
            Some(Value::String(p)) => Some(p),
            _ => None,
        };
        if let Some(account) = backend.accounts.iter_mut().find(|a| a.user_id == id) {
            if let Some(email) = email {
                account.email = email;
            }
            if let Some(password) = password {
                account.password = password;
            }
        }
    }

    let record = backend
        .find_mut(&collection, id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Record not found"))?;
    if let Value::Object(fields) = &mut *record {
        fields.extend(changes);
    }
    Ok(Json(record.clone()))
}

async fn remove(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = lock(&state);
    backend.enter("DELETE", format!("{collection}/{id}"), Some(&headers), None)?;
    let records = backend
        .collections
        .get_mut(&collection)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Unknown collection"))?;
    let before = records.len();
    records.retain(|r| r["id"] != id);
    if records.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Record not found"));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}

async fn transition(
    State(state): State<Shared>,
    Path((collection, id, action)): Path<(String, i64, String)>,
    headers: HeaderMap,
) -> Reply {
    let mut backend = lock(&state);
    backend.enter("PUT", format!("{collection}/{id}/{action}"), Some(&headers), None)?;
    let (field, value) = match (collection.as_str(), action.as_str()) {
        ("conges", "approve") => ("statut", "accepté"),
        ("conges", "reject") => ("statut", "refusé"),
        ("maintenance-requests", "complete") => ("status", "completed"),
        _ => return Err(reject(StatusCode::NOT_FOUND, "Unknown action")),
    };
    let record = backend
        .find_mut(&collection, id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Record not found"))?;
    record[field] = json!(value);
    Ok(Json(record.clone()))
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/user", get(current_user))
        .route("/api/statistiques", get(statistics))
        .route("/api/users/conge", get(employees))
        .route("/api/{collection}", get(list).post(create))
        .route("/api/{collection}/{id}", put(update).delete(remove))
        .route("/api/{collection}/{id}/{action}", put(transition))
        .with_state(state)
}

/// In-memory stand-in for the hospital REST backend, served on an
/// ephemeral local port. Each test gets its own instance and data.
pub struct MockBackend {
    pub base_url: String,
    state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(Backend::seeded()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend stopped");
        });
        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// Client with a fresh, signed-out session.
    pub fn client(&self) -> ApiClient {
        self.client_with(SessionHolder::in_memory())
    }

    pub fn client_with(&self, session: SessionHolder) -> ApiClient {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, session)
    }

    /// Client signed in as one of the seeded accounts.
    pub async fn signed_in(&self, email: &str) -> ApiClient {
        let api = self.client();
        let credentials = Credentials {
            email: email.to_string(),
            password: PASSWORD.to_string(),
        };
        api.session()
            .login(&api, &credentials)
            .await
            .expect("Seeded account should sign in");
        api
    }

    /// Answer `method path` with a 500 until [`Self::recover`].
    pub fn fail(&self, method: &str, path: &str) {
        lock(&self.state).failing.insert(format!("{method} {path}"));
    }

    /// Hold back the answer to a collection listing.
    pub fn delay(&self, method: &str, path: &str, by: Duration) {
        lock(&self.state).delays.insert(format!("{method} {path}"), by);
    }

    pub fn recover(&self) {
        let mut backend = lock(&self.state);
        backend.failing.clear();
        backend.delays.clear();
    }

    /// Invalidate every issued token.
    pub fn revoke_tokens(&self) {
        lock(&self.state).tokens.clear();
    }

    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.state).requests.clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state).requests.len()
    }

    pub fn last_request(&self) -> Option<Recorded> {
        lock(&self.state).requests.last().cloned()
    }

    pub fn record(&self, collection: &str, id: i64) -> Option<Value> {
        lock(&self.state).find(collection, id)
    }

    pub fn count(&self, collection: &str) -> usize {
        lock(&self.state)
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }
}

// ── View cycle, as the list views drive it ──

/// Fetch into the view under a fresh load ticket.
pub async fn load_with<R, Fut>(view: &mut CrudView<R>, fetch: Fut) -> bool
where
    R: Resource,
    Fut: Future<Output = Result<Vec<R>, AppError>>,
{
    let ticket = view.begin_load();
    let result = fetch.await;
    view.finish_load(ticket, result)
}

pub async fn load<R: Resource>(view: &mut CrudView<R>, api: &ApiClient) -> bool {
    load_with(view, api.list::<R>()).await
}

/// Execute a mutation handed out by the view, report it back and reload
/// when asked to.
pub async fn settle<R: Resource>(
    view: &mut CrudView<R>,
    api: &ApiClient,
    mutation: Mutation<R::Form>,
) -> FollowUp {
    let result = api.execute::<R>(&mutation).await;
    let follow_up = view.finish_mutation(&mutation, result);
    if follow_up == FollowUp::Reload {
        load(view, api).await;
    }
    follow_up
}
