//! Closed catalog of canned Mongolian answers for the ЭМД chatbot.
//!
//! Every response the service can give lives here as a variant of [`Answer`],
//! so the set of possible replies is checkable at compile time. Texts are
//! returned verbatim; there is no interpolation.

/// A canned answer topic. One variant per response in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Greeting ("сайн байна уу").
    Greeting,
    /// Insurance booklets are no longer required.
    NoBooklet,
    /// Hospitals that treat stomach illness.
    StomachIllness,
    /// Discounted cold/flu medicines.
    ColdFlu,
    /// Paracetamol discount details.
    Paracetamol,
    /// Hospitals under insurance contract.
    ContractedHospitals,
    /// Monthly premium amounts.
    FeeAmount,
    /// How to check missed premium months.
    MissedMonths,
    /// The discounted medicine list.
    DiscountedMedicines,
    /// Services covered by the insurance.
    CoveredServices,
    /// Channels for paying the premium.
    PaymentChannels,
    /// Coverage is mandatory by law.
    MandatoryCoverage,
    /// What a "битүүмж" (facility seal) is.
    Seal,
    /// Default answer when no rule matched.
    General,
    /// The message was empty and could not be processed.
    EmptyMessage,
}

impl Answer {
    /// The canned text for this answer. Exhaustive on purpose: a new variant
    /// without a text will not compile.
    pub const fn text(self) -> &'static str {
        match self {
            Answer::Greeting => {
                "Сайн байна уу! Би Эрүүл Мэндийн Даатгалын бот байна. Танд хэрхэн туслах вэ?"
            }
            Answer::NoBooklet => {
                "Эрүүл мэндийн даатгалын цахим системд шилжсэнээс хойш эрүүл мэндийн даатгалын дэвтэр шаардлагагүй болсон. Регистрийн дугаараар болон хурууны хээгээ уншуулж эрүүл мэндийн тусламж үйлчилгээ авах боломжтой."
            }
            Answer::StomachIllness => {
                "Ходоодны өвчний үед Эрүүл мэндийн даатгалын гэрээт эмнэлэгт үзүүлэх боломжтой. Улсын гуравдугаар төв эмнэлэг, Улсын нэгдүгээр төв эмнэлэг, Гастроэнтерологийн төв зэрэг ходоодны өвчнөөр мэргэшсэн эмнэлгүүд байдаг. Эмнэлгийн дэлгэрэнгүй жагсаалтыг emd.gov.mn сайтын 'Гэрээт байгууллага' цэснээс харах боломжтой."
            }
            Answer::ColdFlu => {
                "Ханиад, томууны үед хэрэглэх хөнгөлөлттэй эмэнд Парацетамол, Ибупрофен, Аспирин, Амоксициллин зэрэг орж, 40-70% хөнгөлөлттэй. Эмч Танд өвчний онцлогт тохирсон эм бичиж өгөх болно. Өрхийн эмнэлэгт үзүүлээд, эмийн жор авах нь хамгийн зөв."
            }
            Answer::Paracetamol => {
                "Парацетамол нь Эрүүл мэндийн даатгалын хөнгөлөлттэй эмийн жагсаалтад орсон бөгөөд 50% хөнгөлөлттэй. Эмчийн бичсэн жороор өрхийн эмнэлэг болон эмийн сангуудаас авах боломжтой."
            }
            Answer::ContractedHospitals => {
                "Эрүүл мэндийн даатгалын ерөнхий газар нь бүх аймаг, дүүргийн нэгдсэн эмнэлэг, төв эмнэлэг, өрхийн эмнэлэг болон 150 гаруй хувийн эмнэлэгтэй гэрээтэй. Энэ гэрээт эмнэлгүүдэд ЭМД-тай иргэд хөнгөлөлттэй үнээр эмчлүүлэх боломжтой. Бүх гэрээт эмнэлгийн жагсаалтыг emd.gov.mn сайтын 'Гэрээт байгууллага' цэснээс харах боломжтой."
            }
            Answer::FeeAmount => {
                "ЭМД-ын шимтгэлийн хэмжээ: 2025 оны 1-3 сар хүртэл сарын 13200 төгрөг, 4-р сараас эхлэн 15840 төгрөг болно. Ажил олгогч, даатгуулагч тус тус 2:1 харьцаагаар хуваан төлнө. Хувиараа хөдөлмөр эрхлэгч нь бүрэн дүнгээр төлнө."
            }
            Answer::MissedMonths => {
                "Эрүүл мэндийн даатгалын шимтгэлийн дутуу саруудаа дараах сувгуудаар шалгах боломжтой: 1) www.emd.gov.mn сайтаар, 2) www.e-mongolia.mn сайт болон аппликейшнээр, 3) Ибаримт аппликейшн ашиглаж шалгах боломжтой."
            }
            Answer::DiscountedMedicines => {
                "ЭМД-ын хөнгөлөлттэй эмийн жагсаалтад 600 гаруй нэр төрлийн эм орсон бөгөөд 30-100% хүртэлх хөнгөлөлттэй үнээр авах боломжтой. Эмч таны өвчнийг оношлон, тохирох эмийн жор бичиж өгөх бөгөөд, хөнгөлөлттэй эмүүдийг эмчийн жороор авах боломжтой. Бүрэн жагсаалтыг emd.gov.mn сайтаас харах боломжтой."
            }
            Answer::CoveredServices => {
                "Эрүүл мэндийн даатгалаар авах боломжтой үйлчилгээнүүд: 1) Хэвтүүлэн эмчлэх тусламж үйлчилгээ, 2) Амбулаторийн тусламж үйлчилгээ, 3) Өндөр өртөгтэй оношилгоо, шинжилгээ, 4) Яаралтай тусламж, 5) Түргэн тусламж, 6) Телемедицин, 7) Өдрийн эмчилгээ үйлчилгээ, 8) Эмийн үнийн хөнгөлөлт."
            }
            Answer::PaymentChannels => {
                "Эрүүл мэндийн даатгалаа дараах сувгуудаар төлөх боломжтой: 1) И-Баримт гар утасны апп, 2) И-Баримт вэб сайтаар, 3) E-Mongolia аппликейшн, 4) Банкны салбар, 5) Банкны автомат машин (ATM), 6) Интернет банк."
            }
            Answer::MandatoryCoverage => {
                "Эрүүл мэндийн даатгалын тухай хуулиар Монгол улсын иргэн бүр эрүүл мэндийн албан журмын даатгалд заавал даатгуулах үүрэгтэй. Энэхүү даатгал нь эмнэлгийн зардлын төлбөрийг хөнгөвчилдөг."
            }
            Answer::Seal => {
                "Битүүмж нь тухайн эрүүл мэндийн байгууллагад иргэн даатгуулагчийн үйлчлүүлж байгааг илэрхийлсэн мэдээлэл бөгөөд нээх, хаах нь тухайн эрүүл мэндийн байгууллагын хариуцах асуудал юм."
            }
            Answer::General => {
                "Эрүүл мэндийн даатгал нь даатгуулагчийн эрүүл мэндийн улмаас учирч болзошгүй санхүүгийн эрсдэлийг хуваалцах зорилготой. emd.gov.mn сайтаас дэлгэрэнгүй мэдээлэл авах боломжтой. Тодорхой асуулт байвал надаас асууна уу."
            }
            Answer::EmptyMessage => {
                "Уучлаарай, таны мессежийг хүлээн авах боломжгүй байна."
            }
        }
    }
}

/// Returned when the remote NLU answered with an empty reply array.
pub const CANNOT_REPLY_TEXT: &str = "Уучлаарай, би хариу өгөх боломжгүй байна.";

/// Returned when the remote NLU answered with a non-2xx status.
pub const SERVER_ERROR_TEXT: &str = "Серверээс алдаа хариу ирлээ. Дахин оролдоно уу.";

/// Returned when talking to the remote NLU failed in any other way
/// (malformed payload, read error).
pub const COMM_ERROR_TEXT: &str = "NLU серверт хандахад алдаа гарлаа.";
