//! Built-in message tables

/// English validation messages
pub const EN: &[(&str, &str)] = &[
    ("validation.required", "The :attribute field is required."),
    ("validation.required_if", "The :attribute field is required when :other is :value."),
    ("validation.required_with", "The :attribute field is required when :values is present."),
    ("validation.present", "The :attribute field must be present."),
    ("validation.filled", "The :attribute field must have a value."),
    ("validation.email", "The :attribute field must be a valid email address."),
    ("validation.min.numeric", "The :attribute field must be at least :min."),
    ("validation.min.string", "The :attribute field must be at least :min characters."),
    ("validation.min.array", "The :attribute field must have at least :min items."),
    ("validation.max.numeric", "The :attribute field must not be greater than :max."),
    ("validation.max.string", "The :attribute field must not be greater than :max characters."),
    ("validation.max.array", "The :attribute field must not have more than :max items."),
    ("validation.between.numeric", "The :attribute field must be between :min and :max."),
    ("validation.between.string", "The :attribute field must be between :min and :max characters."),
    ("validation.between.array", "The :attribute field must have between :min and :max items."),
    ("validation.size.numeric", "The :attribute field must be :size."),
    ("validation.size.string", "The :attribute field must be :size characters."),
    ("validation.size.array", "The :attribute field must contain :size items."),
    ("validation.in", "The selected :attribute is invalid."),
    ("validation.not_in", "The selected :attribute is invalid."),
    ("validation.numeric", "The :attribute field must be a number."),
    ("validation.integer", "The :attribute field must be an integer."),
    ("validation.string", "The :attribute field must be a string."),
    ("validation.boolean", "The :attribute field must be true or false."),
    ("validation.alpha", "The :attribute field must only contain letters."),
    ("validation.alpha_num", "The :attribute field must only contain letters and numbers."),
    ("validation.uppercase", "The :attribute field must be uppercase."),
    ("validation.lowercase", "The :attribute field must be lowercase."),
    ("validation.date", "The :attribute field must be a valid date."),
    ("validation.uuid", "The :attribute field must be a valid UUID."),
    ("validation.regex", "The :attribute field format is invalid."),
    ("validation.not_regex", "The :attribute field format is invalid."),
    ("validation.same", "The :attribute field must match :other."),
    ("validation.different", "The :attribute field and :other must be different."),
    ("validation.confirmed", "The :attribute field confirmation does not match."),
    ("validation.password.letters", "The :attribute field must contain at least one letter."),
    (
        "validation.password.mixed",
        "The :attribute field must contain at least one uppercase and one lowercase letter.",
    ),
    ("validation.password.numbers", "The :attribute field must contain at least one number."),
    ("validation.password.symbols", "The :attribute field must contain at least one symbol."),
    ("validation.custom.uppercase", "The :attribute field with value :value must be UPPERCASE."),
];

/// Indonesian validation messages
pub const ID: &[(&str, &str)] = &[
    ("validation.required", ":attribute wajib diisi."),
    ("validation.required_if", ":attribute wajib diisi bila :other adalah :value."),
    ("validation.required_with", ":attribute wajib diisi bila terdapat :values."),
    ("validation.present", ":attribute wajib ada."),
    ("validation.filled", ":attribute harus memiliki nilai."),
    ("validation.email", ":attribute harus berupa alamat surel yang valid."),
    ("validation.min.numeric", ":attribute minimal bernilai :min."),
    ("validation.min.string", ":attribute minimal berisi :min karakter."),
    ("validation.min.array", ":attribute minimal terdiri dari :min anggota."),
    ("validation.max.numeric", ":attribute maksimal bernilai :max."),
    ("validation.max.string", ":attribute maksimal berisi :max karakter."),
    ("validation.max.array", ":attribute maksimal terdiri dari :max anggota."),
    ("validation.between.numeric", ":attribute harus bernilai antara :min sampai :max."),
    ("validation.between.string", ":attribute harus berisi antara :min sampai :max karakter."),
    ("validation.between.array", ":attribute harus memiliki :min sampai :max anggota."),
    ("validation.size.numeric", ":attribute harus berukuran :size."),
    ("validation.size.string", ":attribute harus berisi :size karakter."),
    ("validation.size.array", ":attribute harus mengandung :size anggota."),
    ("validation.in", ":attribute yang dipilih tidak valid."),
    ("validation.not_in", ":attribute yang dipilih tidak valid."),
    ("validation.numeric", ":attribute harus berupa angka."),
    ("validation.integer", ":attribute harus berupa bilangan bulat."),
    ("validation.string", ":attribute harus berupa teks."),
    ("validation.boolean", ":attribute harus bernilai true atau false."),
    ("validation.alpha", ":attribute hanya boleh berisi huruf."),
    ("validation.alpha_num", ":attribute hanya boleh berisi huruf dan angka."),
    ("validation.uppercase", ":attribute harus berupa huruf kapital."),
    ("validation.lowercase", ":attribute harus berupa huruf kecil."),
    ("validation.date", ":attribute bukan tanggal yang valid."),
    ("validation.uuid", ":attribute harus UUID yang valid."),
    ("validation.regex", "Format :attribute tidak valid."),
    ("validation.not_regex", "Format :attribute tidak valid."),
    ("validation.same", ":attribute dan :other harus sama."),
    ("validation.different", ":attribute dan :other harus berbeda."),
    ("validation.confirmed", "Konfirmasi :attribute tidak cocok."),
    ("validation.password.letters", ":attribute harus mengandung setidaknya satu huruf."),
    (
        "validation.password.mixed",
        ":attribute harus mengandung setidaknya satu huruf kapital dan satu huruf kecil.",
    ),
    ("validation.password.numbers", ":attribute harus mengandung setidaknya satu angka."),
    ("validation.password.symbols", ":attribute harus mengandung setidaknya satu simbol."),
    ("validation.custom.uppercase", ":attribute dengan nilai :value harus huruf kapital."),
];
