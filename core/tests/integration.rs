//! Full catalog lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `MealService` and
//! `Dashboard` over real HTTP through a ureq-backed `Transport`. Validates
//! that request building, wire mapping and response parsing agree with the
//! server end-to-end.

use meal_core::{
    Dashboard, Field, FixedPrice, HttpMethod, HttpRequest, HttpResponse, MealClient, MealDraft, MealService,
    ModalState, NotificationLog, Operation, Restaurant, RestaurantStatus, Transport, TransportError,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data and the core decides what they mean.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.url).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the mock server on a random port and return its `Food` URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/Food")
}

fn draft(name: &str, rating: f64, status: RestaurantStatus) -> MealDraft {
    MealDraft {
        name: name.to_string(),
        price: Some(7.25),
        rating,
        image_url: format!("https://img.example/{name}.png"),
        restaurant: Restaurant {
            id: MealDraft::local_id(),
            name: "Ignored By Store".to_string(),
            logo_url: "https://img.example/logo.png".to_string(),
            status,
        },
    }
}

#[test]
fn crud_lifecycle() {
    let base = start_server();
    let client = MealClient::new(&base).unwrap();
    let mut service = MealService::new(client, UreqTransport::new(), FixedPrice(10.0));

    // Step 1: list, should be empty.
    assert!(service.list().unwrap().is_empty(), "expected empty list");

    // Step 2: create two meals.
    let soup = service
        .create(&draft("Tomato Soup", 4.5, RestaurantStatus::OpenNow))
        .unwrap();
    assert_eq!(soup.name, "Tomato Soup");
    assert_eq!(soup.rating, 4.5);
    assert_eq!(soup.price, 7.25);
    assert_eq!(soup.restaurant.status, RestaurantStatus::OpenNow);
    assert_eq!(soup.restaurant.name, format!("Restaurant {}", soup.id));

    let salad = service
        .create(&draft("Green Salad", 3.0, RestaurantStatus::Closed))
        .unwrap();
    assert_ne!(salad.id, soup.id);
    assert_eq!(salad.restaurant.status, RestaurantStatus::Closed);

    // Step 3: search by name.
    let found = service.search("soup").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, soup.id);

    // Step 4: update the salad.
    let mut changed = MealDraft::from(&salad);
    changed.rating = 4.0;
    changed.restaurant.status = RestaurantStatus::OpenNow;
    let updated = service.update(&salad.id, &changed).unwrap();
    assert_eq!(updated.id, salad.id);
    assert_eq!(updated.rating, 4.0);
    assert_eq!(updated.restaurant.status, RestaurantStatus::OpenNow);

    // Step 5: delete the soup.
    service.delete(&soup.id).unwrap();

    // Step 6: delete again, the store answers 404.
    let err = service.delete(&soup.id).unwrap_err();
    assert_eq!(err.operation, Operation::Delete);

    // Step 7: update a missing meal.
    let err = service.update(&soup.id, &changed).unwrap_err();
    assert_eq!(err.operation, Operation::Update);

    // Step 8: list, only the salad remains.
    let meals = service.list().unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].id, salad.id);
}

#[test]
fn dashboard_round_trip() {
    let base = start_server();
    let client = MealClient::new(&base).unwrap();
    let service = MealService::new(client, UreqTransport::new(), FixedPrice(10.0));
    let mut dashboard = Dashboard::new(service, NotificationLog::default());

    dashboard.refresh().unwrap();
    assert_eq!(
        dashboard.catalog().empty_state().map(|state| state.message()),
        Some("No items available")
    );

    dashboard.open_add();
    let form = dashboard.form_mut().unwrap();
    form.set_field(Field::FoodName, "Bibimbap");
    form.set_field(Field::FoodRating, "4.4");
    form.set_field(Field::FoodImageUrl, "https://img.example/bibimbap.png");
    form.set_field(Field::RestaurantName, "Seoul Kitchen");
    form.set_field(Field::RestaurantLogoUrl, "https://img.example/seoul.png");
    let created = dashboard.confirm_save().unwrap();
    assert_eq!(created.price, 12.99);
    assert!(dashboard.catalog().meals()[0].is_new);

    dashboard.open_delete(&created.id).unwrap();
    dashboard.close();
    assert_eq!(dashboard.modal(), &ModalState::None);
    assert_eq!(dashboard.catalog().meals().len(), 1);

    dashboard.search("pizza");
    assert_eq!(
        dashboard.catalog().empty_state().map(|state| state.message()),
        Some("No meals found matching your search")
    );
    dashboard.search("");

    dashboard.open_delete(&created.id).unwrap();
    dashboard.confirm_delete().unwrap();
    assert!(dashboard.catalog().meals().is_empty());

    // A fresh load agrees with the local state.
    dashboard.refresh().unwrap();
    assert!(dashboard.catalog().meals().is_empty());

    let descriptions: Vec<&str> = dashboard
        .notifier()
        .entries()
        .iter()
        .map(|n| n.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec!["Meal created successfully!", "Meal deleted successfully!"]
    );
}
